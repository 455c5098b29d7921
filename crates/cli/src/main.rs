use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use storefront_catalog::FilterCatalog;
use storefront_cli::args::{Cli, Command};
use storefront_cli::{browse, render};
use storefront_graphql::{GraphQlConfig, GraphQlProductFetcher};
use storefront_query::QueryConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storefront_observability::init();

    let cli = Cli::parse();

    let mut graphql = GraphQlConfig::from_env().context("reading GraphQL configuration")?;
    if let Some(endpoint) = &cli.endpoint {
        graphql = graphql.with_endpoint(endpoint.clone());
    }
    if let Some(channel) = &cli.channel {
        graphql = graphql.with_channel(channel.clone());
    }

    match cli.command {
        Command::Browse(args) => {
            let mut config = QueryConfig::from_env().context("reading listing configuration")?;
            if let Some(page_size) = args.page_size {
                config = config.with_page_size(page_size);
            }
            let fetcher = GraphQlProductFetcher::new(graphql).context("building HTTP client")?;

            let report = browse::run(Arc::new(fetcher), &config, &args).await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render::browse_report(&report));
            }
            if let Some(error) = report.error {
                return Err(error).context("loading products");
            }
        }
        Command::Show { slug } => {
            let fetcher = GraphQlProductFetcher::new(graphql).context("building HTTP client")?;
            let product = fetcher
                .fetch_product_by_slug(&slug)
                .await
                .with_context(|| format!("fetching product `{slug}`"))?
                .with_context(|| format!("no product with slug `{slug}`"))?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&product)?);
            } else {
                print!("{}", render::product_detail(&product));
            }
        }
        Command::Filters => {
            let catalog = FilterCatalog::default();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&catalog)?);
            } else {
                print!("{}", render::filter_catalog(&catalog));
            }
        }
    }

    Ok(())
}
