//! JSON export of a crawl result

use crate::crawler::CrawlResult;
use crate::output::traits::{file_stem, OutputFile, OutputHandler, OutputResult};

/// Writes `<host>.json` containing the seed, the links and assets maps, and
/// the skipped and failed sets
#[derive(Debug, Default)]
pub struct JsonOutputHandler;

impl OutputHandler for JsonOutputHandler {
    fn render(&self, result: &CrawlResult) -> OutputResult<Vec<OutputFile>> {
        let contents = serde_json::to_string_pretty(result)?;
        let name = format!("{}.json", file_stem(result));
        Ok(vec![OutputFile::new(name, contents)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_json() {
        let mut result = CrawlResult::new("http://abcd.com");
        result.links.insert(
            "http://abcd.com".to_string(),
            vec!["http://abcd.com/a".to_string()],
        );
        result
            .assets
            .insert("http://abcd.com".to_string(), vec!["/logo.png".to_string()]);
        result.failed.insert("http://abcd.com/a".to_string());

        let files = JsonOutputHandler.render(&result).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "abcd.com.json");

        let value: serde_json::Value = serde_json::from_str(&files[0].contents).unwrap();
        assert_eq!(value["seed"], "http://abcd.com");
        assert_eq!(value["links"]["http://abcd.com"][0], "http://abcd.com/a");
        assert_eq!(value["assets"]["http://abcd.com"][0], "/logo.png");
        assert_eq!(value["failed"][0], "http://abcd.com/a");
        assert!(value["skipped"].as_array().unwrap().is_empty());
    }
}
