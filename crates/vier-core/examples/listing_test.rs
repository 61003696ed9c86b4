use tracing_subscriber::EnvFilter;
use vier_core::VierScraper;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let scraper = VierScraper::new()?;

    let listings = [
        "http://www.vier.be/demoestuin/videos?page=6",
        "http://www.vier.be/demoestuin/videos?page=7",
        "http://www.vijf.be/temptationisland/videos",
    ];

    for url in listings {
        println!("\n{}", "=".repeat(60));
        println!("{}", url);
        println!("{}\n", "=".repeat(60));

        let playlist = scraper.list_videos(url).await?;
        println!("{}: {} videos", playlist.id, playlist.entries.len());
        for entry in playlist.entries.iter().take(5) {
            println!("   {} ({})", entry.display_id, entry.video_id.as_deref().unwrap_or("-"));
        }
        if playlist.entries.len() > 5 {
            println!("   ... and {} more", playlist.entries.len() - 5);
        }
    }

    Ok(())
}
