use clap::{Args, Parser, Subcommand};

use storefront_filters::{FilterSelection, parse_filter_arg};

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Browse the storefront product catalog")]
pub struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// GraphQL endpoint (overrides STOREFRONT_GRAPHQL_URL)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Sales channel (overrides STOREFRONT_CHANNEL)
    #[arg(long, global = true)]
    pub channel: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List products matching filters and search
    Browse(BrowseArgs),
    /// Show a single product
    Show {
        /// Product slug
        slug: String,
    },
    /// List the known filter options
    Filters,
}

#[derive(Debug, Clone, Args)]
pub struct BrowseArgs {
    /// Attribute filter as `attribute=value` (repeatable)
    #[arg(long = "filter", value_name = "ATTR=VALUE", value_parser = parse_filter_arg)]
    pub filters: Vec<(String, String)>,

    /// Search term
    #[arg(long)]
    pub search: Option<String>,

    /// Number of pages to load
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,

    /// Products per page (overrides STOREFRONT_PAGE_SIZE)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,
}

impl BrowseArgs {
    pub fn selection(&self) -> FilterSelection {
        FilterSelection::from_pairs(self.filters.iter().map(|(a, v)| (a.as_str(), v.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_repeated_filters() {
        let cli = Cli::try_parse_from([
            "storefront",
            "browse",
            "--filter",
            "shape=round",
            "--filter",
            "shape=oval",
            "--filter",
            "metal=gold",
            "--search",
            "ring",
            "--pages",
            "3",
            "--json",
        ])
        .unwrap();

        assert!(cli.json);
        let Command::Browse(args) = cli.command else {
            panic!("expected browse");
        };
        assert_eq!(args.pages, 3);
        assert_eq!(args.search.as_deref(), Some("ring"));
        let selection = args.selection();
        assert_eq!(selection.active_count(), 3);
        assert_eq!(selection.attribute_count(), 2);
        assert!(selection.is_selected("shape", "oval"));
    }

    #[test]
    fn rejects_malformed_filter() {
        assert!(Cli::try_parse_from(["storefront", "browse", "--filter", "shape"]).is_err());
    }

    #[test]
    fn rejects_zero_pages() {
        assert!(Cli::try_parse_from(["storefront", "browse", "--pages", "0"]).is_err());
    }

    #[test]
    fn show_takes_slug() {
        let cli = Cli::try_parse_from(["storefront", "show", "solitaire-ring"]).unwrap();
        assert!(matches!(cli.command, Command::Show { slug } if slug == "solitaire-ring"));
    }
}
