use clap::Parser;
use lbpp::{Augmenter, DeferredLoader, HtmlDocument, HttpIconLoader, LbppConfig};
use std::time::Duration;

mod args;
use args::{Args, convert_source};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        ::log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> lbpp::Result<()> {
    let mut config = match &args.config {
        Some(path) => LbppConfig::from_file(path)?,
        None => LbppConfig::default(),
    }
    .with_env_overrides();
    if let Some(url) = &args.webdriver_url {
        config.webdriver_url = url.clone();
    }

    let augmenter = Augmenter::new(&config)?;
    let source = convert_source(args.type_, &args.source);

    // Gate before loading when the URL is already known
    let known_url = args.page_url.as_deref().or(source.url());
    if let Some(url) = known_url {
        if !augmenter.should_activate(url) {
            ::log::info!("{} is not a film page, nothing to do", url);
            return Ok(());
        }
    }

    let page = source.load(&config.webdriver_url).await?;
    let page_url = args.page_url.clone().or(page.url.clone());
    let activated = page_url
        .as_deref()
        .is_none_or(|url| augmenter.should_activate(url));

    let mut doc = HtmlDocument::parse(&page.html);

    if args.links_only {
        let links = if activated {
            augmenter.links_for(&doc).unwrap_or_default()
        } else {
            Vec::new()
        };
        println!("{}", serde_json::to_string_pretty(&links)?);
        return Ok(());
    }

    if activated {
        let started = std::time::Instant::now();
        if args.fetch_icons {
            let loader = HttpIconLoader::new()?;
            if let Some(mut panel) = augmenter.augment(&mut doc, &loader) {
                panel
                    .settle(&mut doc, Some(Duration::from_secs(args.settle_secs)))
                    .await;
                let pending = panel.slots().iter().filter(|s| s.state.is_pending()).count();
                ::log::info!(
                    "Added {} links ({} icons still pending) in {:.2} seconds",
                    panel.slots().len(),
                    pending,
                    started.elapsed().as_secs_f64()
                );
            }
        } else if let Some(panel) = augmenter.augment(&mut doc, &DeferredLoader) {
            ::log::info!("Added {} links", panel.slots().len());
        }
    } else {
        ::log::info!("Page moved off a film URL, writing it back unchanged");
    }

    let html = doc.to_html();
    match &args.output {
        Some(path) => tokio::fs::write(path, html).await?,
        None => println!("{}", html),
    }

    Ok(())
}
