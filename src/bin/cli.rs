//! scijournal CLI
//!
//! Admin and inspection commands against a journal site backend.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use scijournal::{
    Site,
    api::FilePart,
    error::Result,
    models::{
        ArticleDraft, JournalInput, Locale, LocalizedText, NewsDraft, PublicationDraft, RecordId,
        TextInput,
    },
    richtext::{self, Block, Inline},
    store::{ContactForm, NewsForm, Resource, ResourceStore},
    view::{ArchiveIndex, paginate, search_articles},
};
use serde::Serialize;

/// scijournal - journal site data CLI
#[derive(Parser, Debug)]
#[command(
    name = "scijournal",
    version,
    about = "Browse and administer a multi-journal publishing site"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "scijournal.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and keep the session for later commands
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },

    /// Drop the stored session
    Logout,

    /// Check the stored session against the backend
    Whoami,

    /// List a collection
    List {
        resource: ResourceKind,
        /// Only articles of this journal
        #[arg(long)]
        journal: Option<String>,
        /// Zero-based page
        #[arg(long, default_value_t = 0)]
        page: usize,
    },

    /// Show one record as JSON
    Show { resource: ResourceKind, id: String },

    /// Delete one record (admin)
    Delete { resource: ResourceKind, id: String },

    /// Search a journal's articles by Russian title and authors
    ///
    /// Without a journal every configured micro-site is searched.
    Search {
        #[arg(long)]
        journal: Option<String>,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        author: String,
    },

    /// Years and issues published by a journal, or by every configured one
    Archive { journal: Option<String> },

    /// Manage journals (admin)
    Journal {
        #[command(subcommand)]
        action: JournalAction,
    },

    /// Manage articles (admin)
    Article {
        #[command(subcommand)]
        action: ArticleAction,
    },

    /// Manage news items (admin)
    News {
        #[command(subcommand)]
        action: NewsAction,
    },

    /// Add a home-page slider publication (admin)
    Publication {
        #[command(subcommand)]
        action: PublicationAction,
    },

    /// Manage files for authors (admin)
    AuthorFile {
        #[command(subcommand)]
        action: AuthorFileAction,
    },

    /// Manage book entries (admin)
    Book {
        #[command(subcommand)]
        action: TextAction,
    },

    /// Manage association entries (admin)
    Association {
        #[command(subcommand)]
        action: TextAction,
    },

    /// Manage article categories (admin)
    Category {
        #[command(subcommand)]
        action: TextAction,
    },

    /// Show or edit the contact page
    Contact {
        #[command(subcommand)]
        action: ContactAction,
    },

    /// Validate the configuration file
    Validate,
}

#[derive(Subcommand, Debug)]
enum TextAction {
    Add { text: String },
    Edit { id: String, text: String },
}

#[derive(Subcommand, Debug)]
enum JournalAction {
    Add {
        name: String,
        abbreviation: String,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        abbreviation: Option<String>,
        /// Section text as LANG=HTML, repeatable
        #[arg(long, value_parser = parse_localized)]
        about: Vec<(String, String)>,
        #[arg(long, value_parser = parse_localized)]
        editorial_board: Vec<(String, String)>,
        #[arg(long, value_parser = parse_localized)]
        indexing: Vec<(String, String)>,
    },
}

#[derive(Subcommand, Debug)]
enum ArticleAction {
    Add(ArticleArgs),
    Edit {
        id: String,
        #[command(flatten)]
        fields: ArticleArgs,
    },
}

/// Article fields; localized ones are given as LANG=TEXT and may repeat.
#[derive(Args, Debug)]
struct ArticleArgs {
    /// Abbreviation of the owning journal
    #[arg(long)]
    journal: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    year: Option<i32>,
    #[arg(long)]
    issue: Option<u32>,
    #[arg(long)]
    sub_issue: Option<String>,
    #[arg(long)]
    doi: Option<String>,
    #[arg(long, value_parser = parse_localized)]
    title: Vec<(String, String)>,
    #[arg(long, value_parser = parse_localized)]
    authors: Vec<(String, String)>,
    #[arg(long = "abstract", value_parser = parse_localized)]
    abstracts: Vec<(String, String)>,
    #[arg(long, value_parser = parse_localized)]
    keywords: Vec<(String, String)>,
    #[arg(long, value_parser = parse_localized)]
    authors_info: Vec<(String, String)>,
    #[arg(long, value_parser = parse_localized)]
    udc: Vec<(String, String)>,
    #[arg(long)]
    page_start: Option<u32>,
    #[arg(long)]
    page_end: Option<u32>,
    /// PDF to upload with the article
    #[arg(long)]
    pdf: Option<PathBuf>,
}

impl ArticleArgs {
    fn apply(self, draft: &mut ArticleDraft) -> Option<PathBuf> {
        if let Some(journal) = self.journal {
            draft.journal_abbr = journal;
        }
        draft.category = self.category.or(draft.category.take());
        draft.year = self.year.or(draft.year);
        draft.issue_number = self.issue.or(draft.issue_number);
        draft.sub_issue_number = self.sub_issue.or(draft.sub_issue_number.take());
        draft.doi = self.doi.or(draft.doi.take());
        merge(&mut draft.titles, self.title);
        merge(&mut draft.authors, self.authors);
        merge(&mut draft.abstracts, self.abstracts);
        merge(&mut draft.keywords, self.keywords);
        merge(&mut draft.authors_info, self.authors_info);
        merge(&mut draft.udc, self.udc);
        draft.page_start = self.page_start.or(draft.page_start);
        draft.page_end = self.page_end.or(draft.page_end);
        self.pdf
    }
}

/// Title, description and image shared by news and slider items.
#[derive(Args, Debug)]
struct PostArgs {
    #[arg(long, value_parser = parse_localized)]
    title: Vec<(String, String)>,
    #[arg(long, value_parser = parse_localized)]
    description: Vec<(String, String)>,
    #[arg(long)]
    image: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum NewsAction {
    Add {
        /// Publication date, e.g. 2024-05-01
        #[arg(long, default_value = "")]
        date: String,
        #[command(flatten)]
        post: PostArgs,
    },
    Edit {
        id: String,
        #[arg(long)]
        date: Option<String>,
        #[command(flatten)]
        post: PostArgs,
    },
}

#[derive(Subcommand, Debug)]
enum PublicationAction {
    Add(PostArgs),
}

#[derive(Subcommand, Debug)]
enum AuthorFileAction {
    Add {
        title: String,
        #[arg(long)]
        file: Option<PathBuf>,
    },
    Rename {
        id: String,
        title: String,
    },
    /// Move one place towards the top
    Up { id: String },
    /// Move one place towards the bottom
    Down { id: String },
}

#[derive(Subcommand, Debug)]
enum ContactAction {
    Show,
    /// Replace contact details (admin); omitted fields keep their value
    Update {
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, value_parser = parse_localized)]
        address: Vec<(String, String)>,
        /// Image to upload, repeatable
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },
    /// Remove a stored contact image (admin)
    DeleteImage { name: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ResourceKind {
    Journals,
    Articles,
    Categories,
    News,
    Books,
    Associations,
    AuthorFiles,
    Publications,
}

/// Parse `LANG=TEXT`, keeping the language key as written.
fn parse_localized(value: &str) -> std::result::Result<(String, String), String> {
    let (key, text) = value
        .split_once('=')
        .ok_or_else(|| format!("expected LANG=TEXT, got '{value}'"))?;
    key.parse::<Locale>().map_err(|e| e.to_string())?;
    Ok((key.trim().to_string(), text.to_string()))
}

fn merge(text: &mut LocalizedText, values: Vec<(String, String)>) {
    for (key, value) in values {
        text.set(key, value);
    }
}

async fn file_part(path: Option<PathBuf>) -> Result<Option<FilePart>> {
    match path {
        Some(path) => Ok(Some(FilePart::from_path(path).await?)),
        None => Ok(None),
    }
}

/// The journal given on the command line, or every configured one.
fn journals_or_configured(site: &Site, journal: Option<String>) -> Vec<String> {
    match journal {
        Some(abbr) => vec![abbr],
        None => site.config.site.journals.clone(),
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render stored journal text as plain lines.
fn print_fragment(html: &str) {
    for block in richtext::render_fragment(html) {
        match block {
            Block::LineBreak => println!(),
            Block::Paragraph { content, .. } => {
                let line: String = content.iter().map(Inline::text).collect();
                println!("{line}");
            }
        }
    }
}

async fn list<R: Resource + Serialize>(
    store: &ResourceStore<R>,
    page: usize,
    per_page: usize,
) -> Result<()> {
    let items = store.fetch_all().await?;
    let page = paginate(&items, page, per_page);
    print_json(&page.items)?;
    log::info!("Page {} of {}", page.index + 1, page.total_pages.max(1));
    Ok(())
}

async fn show<R: Resource + Serialize>(store: &ResourceStore<R>, id: &RecordId) -> Result<()> {
    print_json(&store.fetch_one(id).await?)
}

async fn text_action<R: Resource>(store: &ResourceStore<R>, action: TextAction) -> Result<()> {
    match action {
        TextAction::Add { text } => {
            let record = store.create(TextInput::new(text)).await?;
            log::info!("Created {}", record.id());
        }
        TextAction::Edit { id, text } => {
            let id = RecordId::from(id.as_str());
            store.update(&id, TextInput::new(text)).await?;
            log::info!("Updated {}", id);
        }
    }
    Ok(())
}

async fn category_action(site: &Site, action: TextAction) -> Result<()> {
    use scijournal::models::CategoryInput;
    match action {
        TextAction::Add { text } => {
            let record = site.categories.create(CategoryInput::new(text)).await?;
            log::info!("Created category {}", record.id);
        }
        TextAction::Edit { id, text } => {
            let id = RecordId::from(id.as_str());
            site.categories.update(&id, CategoryInput::new(text)).await?;
            log::info!("Renamed category {}", id);
        }
    }
    Ok(())
}

async fn journal_action(site: &Site, action: JournalAction) -> Result<()> {
    match action {
        JournalAction::Add { name, abbreviation } => {
            let journal = site
                .journals
                .create(JournalInput::new(name, abbreviation))
                .await?;
            log::info!("Created journal {} ({})", journal.abbreviation, journal.id);
        }
        JournalAction::Edit {
            id,
            name,
            abbreviation,
            about,
            editorial_board,
            indexing,
        } => {
            let id = RecordId::from(id.as_str());
            let mut input = JournalInput::from(&site.journals.fetch_one(&id).await?);
            if let Some(name) = name {
                input.name = name;
            }
            if let Some(abbreviation) = abbreviation {
                input.abbreviation = abbreviation;
            }
            merge(&mut input.about, about);
            merge(&mut input.editorial_board, editorial_board);
            merge(&mut input.indexing, indexing);
            site.journals.update(&id, input).await?;
            log::info!("Updated journal {}", id);
        }
    }
    Ok(())
}

async fn article_action(site: &Site, action: ArticleAction) -> Result<()> {
    let journals = site.journals.fetch_all().await?;
    match action {
        ArticleAction::Add(fields) => {
            let mut draft = ArticleDraft::default();
            let pdf = file_part(fields.apply(&mut draft)).await?;
            let article = site.articles.create_article(draft, pdf, &journals).await?;
            log::info!("Created article {}", article.id);
        }
        ArticleAction::Edit { id, fields } => {
            let id = RecordId::from(id.as_str());
            let mut draft = ArticleDraft::from(&site.articles.fetch_one(&id).await?);
            let pdf = file_part(fields.apply(&mut draft)).await?;
            site.articles
                .update_article(&id, draft, pdf, &journals)
                .await?;
            log::info!("Updated article {}", id);
        }
    }
    Ok(())
}

async fn news_action(site: &Site, action: NewsAction) -> Result<()> {
    match action {
        NewsAction::Add { date, post } => {
            let mut draft = NewsDraft {
                date,
                ..NewsDraft::default()
            };
            merge(&mut draft.title, post.title);
            merge(&mut draft.description, post.description);
            let image = file_part(post.image).await?;
            let item = site.news.create(NewsForm::new(draft, image)).await?;
            log::info!("Created news item {}", item.id);
        }
        NewsAction::Edit { id, date, post } => {
            let id = RecordId::from(id.as_str());
            let current = site.news.fetch_one(&id).await?;
            let mut draft = NewsDraft {
                title: current.title,
                description: current.description,
                date: date.or(current.date).unwrap_or_default(),
            };
            merge(&mut draft.title, post.title);
            merge(&mut draft.description, post.description);
            let image = file_part(post.image).await?;
            site.news.update(&id, NewsForm::new(draft, image)).await?;
            log::info!("Updated news item {}", id);
        }
    }
    Ok(())
}

async fn author_file_action(site: &Site, action: AuthorFileAction) -> Result<()> {
    let files = &site.author_files;
    match action {
        AuthorFileAction::Add { title, file } => {
            let record = files.add(title, file_part(file).await?).await?;
            log::info!("Added author file {}", record.id);
        }
        AuthorFileAction::Rename { id, title } => {
            let record = files.rename(&RecordId::from(id.as_str()), title).await?;
            log::info!("Renamed author file {} to {}", record.id, record.title);
        }
        AuthorFileAction::Up { id } => {
            files.load().await?;
            files.move_up(&RecordId::from(id.as_str())).await?;
        }
        AuthorFileAction::Down { id } => {
            files.load().await?;
            files.move_down(&RecordId::from(id.as_str())).await?;
        }
    }
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let site = Site::from_config_file(Some(cli.config.as_path())).await?;
    log::debug!("Using backend {}", site.config.api.base_url);
    let per_page = site.config.site.page_size;

    match cli.command {
        Command::Login { username, password } => {
            let user = site.auth.login(&username, &password).await?;
            log::info!("Logged in as {} ({})", user.username, user.role);
        }

        Command::Logout => {
            site.auth.logout().await?;
            log::info!("Logged out");
        }

        Command::Whoami => {
            let user = site.guard.require_admin().await?;
            log::info!("{} ({})", user.username, user.role);
        }

        Command::List {
            resource,
            journal,
            page,
        } => match resource {
            ResourceKind::Journals => list(&site.journals, page, per_page).await?,
            ResourceKind::Articles => match journal {
                Some(abbr) => {
                    let items = site.articles.fetch_by_journal(&abbr).await?;
                    print_json(&paginate(&items, page, per_page).items)?;
                }
                None => list(&site.articles, page, per_page).await?,
            },
            ResourceKind::Categories => list(&site.categories, page, per_page).await?,
            ResourceKind::News => list(&site.news, page, per_page).await?,
            ResourceKind::Books => list(&site.books, page, per_page).await?,
            ResourceKind::Associations => list(&site.associations, page, per_page).await?,
            ResourceKind::AuthorFiles => list(&site.author_files, page, per_page).await?,
            ResourceKind::Publications => list(&site.publications, page, per_page).await?,
        },

        Command::Show { resource, id } => {
            let id = RecordId::from(id.as_str());
            match resource {
                ResourceKind::Journals => {
                    let journal = site.journals.fetch_one(&id).await?;
                    let locale = site.config.locale();
                    println!("{} ({})", journal.name, journal.abbreviation);
                    print_fragment(journal.about.get(locale));
                }
                ResourceKind::Articles => show(&site.articles, &id).await?,
                ResourceKind::Categories => show(&site.categories, &id).await?,
                ResourceKind::News => show(&site.news, &id).await?,
                ResourceKind::Books => show(&site.books, &id).await?,
                ResourceKind::Associations => show(&site.associations, &id).await?,
                ResourceKind::AuthorFiles => show(&site.author_files, &id).await?,
                ResourceKind::Publications => show(&site.publications, &id).await?,
            }
        }

        Command::Delete { resource, id } => {
            site.guard.require_admin().await?;
            let id = RecordId::from(id.as_str());
            match resource {
                ResourceKind::Journals => site.journals.delete(&id).await?,
                ResourceKind::Articles => site.articles.delete(&id).await?,
                ResourceKind::Categories => site.categories.delete(&id).await?,
                ResourceKind::News => site.news.delete(&id).await?,
                ResourceKind::Books => site.books.delete(&id).await?,
                ResourceKind::Associations => site.associations.delete(&id).await?,
                ResourceKind::AuthorFiles => site.author_files.delete(&id).await?,
                ResourceKind::Publications => site.publications.delete(&id).await?,
            }
            log::info!("Deleted {:?} {}", resource, id);
        }

        Command::Search {
            journal,
            title,
            author,
        } => {
            for abbr in journals_or_configured(&site, journal) {
                let articles = site.articles.fetch_by_journal(&abbr).await?;
                let found = search_articles(&articles, &title, &author);
                if found.is_empty() {
                    log::info!("{abbr}: no matching articles");
                }
                for article in found {
                    println!(
                        "{}\t{}\t{}\t{}",
                        abbr,
                        article.id,
                        article.titles.get(Locale::Ru),
                        article.authors.get(Locale::Ru)
                    );
                }
            }
        }

        Command::Archive { journal } => {
            for abbr in journals_or_configured(&site, journal) {
                let articles = site.articles.fetch_by_journal(&abbr).await?;
                let index = ArchiveIndex::build(&articles);
                if index.is_empty() {
                    log::info!("{abbr}: no issues published yet");
                }
                for year in &index.years {
                    let issues: Vec<String> = year.issues.iter().map(u32::to_string).collect();
                    println!("{abbr} {}: {}", year.year, issues.join(", "));
                }
            }
        }

        Command::Journal { action } => {
            site.guard.require_admin().await?;
            journal_action(&site, action).await?;
        }

        Command::Article { action } => {
            site.guard.require_admin().await?;
            article_action(&site, action).await?;
        }

        Command::News { action } => {
            site.guard.require_admin().await?;
            news_action(&site, action).await?;
        }

        Command::Publication {
            action: PublicationAction::Add(post),
        } => {
            site.guard.require_admin().await?;
            let mut draft = PublicationDraft::default();
            merge(&mut draft.title, post.title);
            merge(&mut draft.description, post.description);
            let image = file_part(post.image).await?;
            let record = site.publications.add(draft, image).await?;
            log::info!("Added publication {}", record.id);
        }

        Command::AuthorFile { action } => {
            site.guard.require_admin().await?;
            author_file_action(&site, action).await?;
        }

        Command::Book { action } => {
            site.guard.require_admin().await?;
            text_action(&site.books, action).await?;
        }

        Command::Association { action } => {
            site.guard.require_admin().await?;
            text_action(&site.associations, action).await?;
        }

        Command::Category { action } => {
            site.guard.require_admin().await?;
            category_action(&site, action).await?;
        }

        Command::Contact { action } => match action {
            ContactAction::Show => print_json(&site.contact.load().await?)?,
            ContactAction::Update {
                phone,
                email,
                address,
                images,
            } => {
                site.guard.require_admin().await?;
                let mut form = ContactForm::from(&site.contact.load().await?);
                if let Some(phone) = phone {
                    form.phone = phone;
                }
                if let Some(email) = email {
                    form.email = email;
                }
                merge(&mut form.address, address);
                for path in images {
                    form.images.push(FilePart::from_path(path).await?);
                }
                let info = site.contact.update(form).await?;
                log::info!("Contact updated, {} image(s)", info.images.len());
            }
            ContactAction::DeleteImage { name } => {
                site.guard.require_admin().await?;
                let info = site.contact.delete_image(&name).await?;
                log::info!("{} image(s) remain", info.images.len());
            }
        },

        Command::Validate => {
            // Loading the site already validated the file.
            log::info!("✓ Config OK (backend {})", site.config.api.base_url);
        }
    }

    Ok(())
}
