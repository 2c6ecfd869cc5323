use clap::Parser;
use page_extract::{Node, PageExtractor};

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    if let Err(e) = run(&args).await {
        ::log::error!("Extraction from {} failed: {}", args.url, e);
        std::process::exit(1);
    }
}

async fn run(args: &Args) -> page_extract::Result<()> {
    let config = args.to_config()?;
    let extractor = PageExtractor::from_config(&config)?;

    ::log::info!("Extracting {:?} from {}", args.selector, config.url);
    let start_time = std::time::Instant::now();

    if args.first {
        if args.text {
            println!("{}", extractor.fetch_one_text(&args.selector).await?);
        } else if let Some(node) = extractor.fetch_one(&args.selector).await? {
            println!("{}", node.html);
        } else {
            ::log::info!("No element matches {:?}", args.selector);
        }
        return Ok(());
    }

    let count = match (&args.next, args.text) {
        (Some(next), true) => {
            let texts = extractor
                .fetch_all_text(&args.selector, next, Some(args.attr.as_str()))
                .await?;
            texts.iter().for_each(|text| println!("{}", text.trim()));
            texts.len()
        }
        (next, text) => {
            let nodes = extractor
                .fetch_all(&args.selector, next.as_deref(), Some(args.attr.as_str()))
                .await?;
            nodes.iter().for_each(|node| print_node(node, text));
            nodes.len()
        }
    };

    ::log::info!(
        "Extracted {} elements in {:.2} seconds",
        count,
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

fn print_node(node: &Node, text: bool) {
    if text {
        println!("{}", node.normalized_text());
    } else {
        println!("{}", node.html);
    }
}
