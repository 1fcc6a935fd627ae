use crate::output::traits::DisplaySink;
use url::Url;

/// Prints each visited URL to stdout on its own line
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutDisplay;

impl DisplaySink for StdoutDisplay {
    fn display(&self, url: &Url) {
        println!("{}", url);
    }
}
