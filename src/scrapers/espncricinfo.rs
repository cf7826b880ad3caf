//! ESPNcricinfo live-score page: the two team names of the featured match.
//!
//! The first team's name carries an extra `!ds-text-typo-mid3` utility class,
//! the second team's does not. The leading `!` has to be escaped in CSS.

use super::{Interaction, Source, origin};
use crate::chain::{Css, SelectorChain};
use crate::discovery::Discovery;
use crate::error::ConfigError;
use crate::schema::{Field, Schema};
use crate::throttle::Throttle;

pub const NAME: &str = "espncricinfo";
pub const BASE_ORIGIN: &str = "https://www.espncricinfo.com";
pub const DEFAULT_OUTPUT: &str = "cricket_teams.csv";

const TEAM_NAME: &str = "p.ds-text-tight-m.ds-font-bold.ds-capitalize.ds-truncate";

fn schema() -> Result<Schema, ConfigError> {
    Schema::new(
        NAME,
        vec![
            Field::new(
                "team1",
                "No Team Found",
                SelectorChain::new().or(Css::text(&format!(r"{TEAM_NAME}.\!ds-text-typo-mid3"))?),
            ),
            Field::new(
                "team2",
                "No Team Found",
                SelectorChain::new()
                    .or(Css::text(&format!(r"{TEAM_NAME}:not(.\!ds-text-typo-mid3)"))?),
            ),
        ],
        "team1",
    )
}

pub fn source() -> Result<Source, ConfigError> {
    Ok(Source {
        name: NAME.to_string(),
        description: "ESPNcricinfo live-score page -> match teams".to_string(),
        base_origin: origin(BASE_ORIGIN)?,
        discovery: Discovery::Single,
        schema: schema()?,
        throttle: Throttle::none(),
        default_output: DEFAULT_OUTPUT.to_string(),
        interaction: Interaction::Save,
    })
}
