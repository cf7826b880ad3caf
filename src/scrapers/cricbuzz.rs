//! Cricbuzz live-score scraper.
//!
//! A single commentary page, no listing: the URL given on the command line is
//! scraped directly for both team scores and the match status line.

use super::{Interaction, Source, origin};
use crate::chain::{Css, SelectorChain};
use crate::discovery::Discovery;
use crate::error::ConfigError;
use crate::schema::{Field, Schema};
use crate::throttle::Throttle;

pub const NAME: &str = "cricbuzz";
pub const BASE_ORIGIN: &str = "https://m.cricbuzz.com";
pub const DEFAULT_OUTPUT: &str = "cricket_scores.csv";

fn schema() -> Result<Schema, ConfigError> {
    Schema::new(
        NAME,
        vec![
            Field::new(
                "bowling_team_score",
                "No Score Found",
                SelectorChain::new().or(Css::text("span.teamscores.ui-bowl-team-scores")?),
            ),
            Field::new(
                "batting_team_score",
                "No Score Found",
                SelectorChain::new().or(Css::text("span.miniscore-teams.ui-bat-team-scores")?),
            ),
            Field::new(
                "status",
                "No Status Found",
                SelectorChain::new().or(Css::text("div.cbz-ui-status")?),
            ),
        ],
        "status",
    )
}

pub fn source() -> Result<Source, ConfigError> {
    Ok(Source {
        name: NAME.to_string(),
        description: "Cricbuzz live commentary page -> score line".to_string(),
        base_origin: origin(BASE_ORIGIN)?,
        discovery: Discovery::Single,
        schema: schema()?,
        throttle: Throttle::none(),
        default_output: DEFAULT_OUTPUT.to_string(),
        interaction: Interaction::Save,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    #[test]
    fn test_score_page() {
        let page = r#"
            <span class="teamscores ui-bowl-team-scores">GT 227/2 (20)</span>
            <span class="miniscore-teams ui-bat-team-scores">LSG 171/7 (20)</span>
            <div class="cbz-ui-status">Gujarat Titans won by 56 runs</div>
        "#;
        let src = source().unwrap();
        let doc = Document::parse("https://m.cricbuzz.com/cricket-commentary/66369", page.as_bytes());
        let r = src.schema.extract(&doc).unwrap();

        assert_eq!(r.get("bowling_team_score"), Some("GT 227/2 (20)"));
        assert_eq!(r.get("batting_team_score"), Some("LSG 171/7 (20)"));
        assert_eq!(r.get("status"), Some("Gujarat Titans won by 56 runs"));
    }
}
