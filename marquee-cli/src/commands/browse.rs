use std::sync::Arc;

use anyhow::{Result, bail};
use clap::Args;
use marquee_config::Config;
use marquee_core::api::{CatalogApi, HttpCatalogApi, InMemoryCatalog};
use marquee_core::i18n::Strings;
use marquee_core::orchestrator::{FetchOutcome, Orchestrator};
use marquee_core::store::CatalogStore;
use marquee_core::url_state::UrlState;
use marquee_core::views::{FilterBar, GridView, Paginator, SearchBox};
use marquee_model::{Locale, MediaStatus, MediaType, SortField, SortOrder};
use tracing::info;

#[derive(Args, Debug, Default)]
pub struct BrowseArgs {
    /// Use the bundled sample catalog instead of the HTTP backend
    #[arg(long)]
    pub offline: bool,

    /// Start from this path and query string, e.g. "/zh/media?type=movie"
    #[arg(long)]
    pub path: Option<String>,

    /// Locale prefix for the default path
    #[arg(long)]
    pub locale: Option<Locale>,

    #[arg(long)]
    pub sort: Option<SortField>,

    #[arg(long)]
    pub order: Option<SortOrder>,

    #[arg(long = "type")]
    pub media_type: Option<MediaType>,

    #[arg(long)]
    pub genre: Option<String>,

    #[arg(long)]
    pub year: Option<u16>,

    /// Minimum rating
    #[arg(long)]
    pub rating: Option<f32>,

    #[arg(long)]
    pub status: Option<MediaStatus>,

    #[arg(long)]
    pub page: Option<u32>,

    #[arg(long)]
    pub page_size: Option<u32>,

    /// Search instead of listing (always starts at page 1)
    #[arg(long, short)]
    pub query: Option<String>,
}

pub async fn run(config: &Config, args: BrowseArgs) -> Result<()> {
    let api: Arc<dyn CatalogApi> = if args.offline {
        Arc::new(InMemoryCatalog::sample())
    } else {
        Arc::new(HttpCatalogApi::new(
            &config.api.base_url,
            config.api.request_timeout,
        )?)
    };

    let locale = args.locale.unwrap_or(config.browse.locale);
    let start = args
        .path
        .clone()
        .unwrap_or_else(|| format!("/{}/media", locale.code()));
    let (url_state, _history) = UrlState::in_memory(&start);
    let store = CatalogStore::shared();
    let orchestrator = Arc::new(Orchestrator::new(
        url_state.clone(),
        store.clone(),
        api,
    ));

    apply_filters(&url_state, &args);

    let paginator = Paginator::new(url_state.clone(), store.clone());
    let page_size = args.page_size.or_else(|| {
        (!url_state.snapshot().contains("pageSize"))
            .then_some(config.browse.default_page_size)
    });
    if let Some(page_size) = page_size {
        paginator.set_page_size(page_size);
    }
    if let Some(page) = args.page {
        paginator.go_to(page);
    }

    let outcome = match args.query.as_deref() {
        Some(query) => {
            match SearchBox::new(Arc::clone(&orchestrator)).submit(query).await {
                Some(outcome) => outcome,
                None => orchestrator.refresh().await,
            }
        }
        None => orchestrator.mount(None).await,
    };
    if let FetchOutcome::Failed { reason, .. } = outcome {
        bail!("catalog request failed: {reason}");
    }
    // Writes above were already honoured; drain their signals.
    orchestrator.process_pending().await;

    let location = url_state.location();
    let locale = location.locale().unwrap_or(locale);
    info!("Showing {}", location);
    render(&GridView::new(store), locale);
    Ok(())
}

fn apply_filters(url_state: &UrlState, args: &BrowseArgs) {
    let filters = FilterBar::new(url_state.clone());

    if args.sort.is_some() || args.order.is_some() {
        let current = filters.current_sort();
        let field = args
            .sort
            .or(current.map(|option| option.field))
            .unwrap_or(SortField::Rating);
        let order = args
            .order
            .or(current.map(|option| option.order))
            .unwrap_or_default();
        filters.set_sort(field, order);
    }
    if args.media_type.is_some() {
        filters.set_media_type(args.media_type);
    }
    if args.status.is_some() {
        filters.set_status(args.status);
    }
    if args.genre.is_some() {
        filters.set_genre(args.genre.as_deref());
    }
    if args.year.is_some() {
        filters.set_year(args.year);
    }
    if args.rating.is_some() {
        filters.set_min_rating(args.rating);
    }
}

fn render(grid: &GridView, locale: Locale) {
    let strings = Strings::for_locale(locale);

    for row in grid.rows(locale) {
        println!(
            "{:<8} {:<40} {:>4}  {:>4.1}  {:<10} {}",
            row.id.to_string(),
            row.title,
            row.year,
            row.rating,
            strings.media_type(row.media_type),
            strings.status(row.status),
        );
    }
    println!("{}", grid.status_line(strings));
}
