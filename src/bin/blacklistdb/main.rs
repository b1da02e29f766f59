use anyhow::Context;
use blacklistdb::app_config::AppConfig;
use blacklistdb::content::ContentStore;
use blacklistdb::reports::{ReportResource, ReportStore};
use env_logger::Env;

#[actix_rt::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let reports = ReportStore::from_config(&config).context("Invalid reports API settings")?;
    let content = ContentStore::from_config(&config).context("Invalid content API settings")?;

    futures::join!(reports.load(), content.fetch_posts(None));

    for resource in [ReportResource::Reports, ReportResource::Banks] {
        if let Some(error) = reports.error(resource) {
            log::warn!("{:?}: {}", resource, error);
        }
    }
    log::info!(
        "Loaded {} reports and {} banks",
        reports.reports().len(),
        reports.banks().len()
    );

    if let Some(error) = content.error() {
        log::warn!("Posts: {}", error);
    }
    let posts = content.posts();
    log::info!("Loaded {} posts", posts.len());
    if let Some(featured) = content.featured_post() {
        log::info!("Featured: {} ({})", featured.title, featured.read_time());
    }

    if let Some(term) = std::env::args().nth(1) {
        let hits = content.search_posts(&term);
        log::info!("{} posts match {:?}", hits.len(), term);
        for post in hits {
            log::info!("  {} /blog/{} by {}", post.title, post.slug(), post.author_name());
        }
    }

    Ok(())
}
