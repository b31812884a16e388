//! One-shot search command

use crate::app::{OutputFormat, SearchArgs};
use crate::output::format_answer;
use anyhow::Result;
use tiersearch_core::{Config, SearchRequest, TierSearchError};

pub async fn run(args: SearchArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let query = args.query.join(" ");
    if query.trim().is_empty() {
        return Err(TierSearchError::InvalidArguments("query must not be empty".to_string()).into());
    }

    let dispatcher = super::build_dispatcher(config)?;
    let request = SearchRequest::new(query)
        .with_intent(args.intent)
        .with_complexity(args.complexity);

    let answer = dispatcher.dispatch(&request).await?;

    print!("{}", format_answer(&answer, format));
    Ok(())
}
