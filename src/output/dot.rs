//! Graphviz (DOT) export of the link and asset graphs
//!
//! Two directed graphs are written:
//! - `<host>_links.dot`: page → followed child page
//! - `<host>_assets.dot`: page → asset, asset nodes in red
//!
//! Page nodes are labelled by their path, or by the full URL for the root.

use crate::crawler::CrawlResult;
use crate::output::traits::{file_stem, OutputFile, OutputHandler, OutputResult};
use std::collections::{BTreeMap, BTreeSet};
use url::Url;

/// Renders the link and asset graphs as DOT descriptions
#[derive(Debug, Default)]
pub struct DotOutputHandler;

impl OutputHandler for DotOutputHandler {
    fn render(&self, result: &CrawlResult) -> OutputResult<Vec<OutputFile>> {
        let stem = file_stem(result);
        Ok(vec![
            OutputFile::new(format!("{}_links.dot", stem), link_graph(&result.links)),
            OutputFile::new(format!("{}_assets.dot", stem), asset_graph(&result.assets)),
        ])
    }
}

/// Directed graph under construction; nodes and edges kept sorted
#[derive(Default)]
struct Graph {
    nodes: BTreeMap<String, Option<&'static str>>,
    edges: BTreeSet<(String, String)>,
}

impl Graph {
    fn node(&mut self, id: String, color: Option<&'static str>) {
        self.nodes.entry(id).or_insert(color);
    }

    fn edge(&mut self, from: &str, to: &str) {
        self.edges.insert((from.to_string(), to.to_string()));
    }

    fn render(&self, name: &str) -> String {
        let mut dot = format!("digraph {} {{\n", name);

        for (id, color) in &self.nodes {
            match color {
                Some(color) => dot.push_str(&format!("\t{} [color={}];\n", id, color)),
                None => dot.push_str(&format!("\t{};\n", id)),
            }
        }

        for (from, to) in &self.edges {
            dot.push_str(&format!("\t{} -> {};\n", from, to));
        }

        dot.push_str("}\n");
        dot
    }
}

/// Builds the page → child page graph
fn link_graph(links: &BTreeMap<String, Vec<String>>) -> String {
    let mut graph = Graph::default();

    for (parent, children) in links {
        let Some(parent_id) = page_id(parent) else {
            continue;
        };
        graph.node(parent_id.clone(), None);

        for child in children {
            let Some(child_id) = page_id(child) else {
                continue;
            };
            graph.node(child_id.clone(), None);
            graph.edge(&parent_id, &child_id);
        }
    }

    graph.render("links")
}

/// Builds the page → asset graph; pages without assets are left out
fn asset_graph(assets: &BTreeMap<String, Vec<String>>) -> String {
    let mut graph = Graph::default();

    for (parent, children) in assets {
        if children.is_empty() {
            continue;
        }

        let Some(parent_id) = page_id(parent) else {
            continue;
        };
        graph.node(parent_id.clone(), None);

        for child in children {
            let child_id = quote(child);
            graph.node(child_id.clone(), Some("red"));
            graph.edge(&parent_id, &child_id);
        }
    }

    graph.render("assets")
}

/// Returns the quoted node id for a page URL
fn page_id(page: &str) -> Option<String> {
    match Url::parse(page) {
        Ok(url) if url.path().is_empty() || url.path() == "/" => Some(quote(page)),
        Ok(url) => Some(quote(url.path())),
        Err(e) => {
            tracing::error!("Failed to parse {} for graph output: {}", page, e);
            None
        }
    }
}

/// Quotes a DOT identifier
fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}
