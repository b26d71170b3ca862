//! National olympic committee codes with a known display name.

const COUNTRY_NAMES: [(&str, &str); 15] = [
  ("USA", "United States"),
  ("CHN", "China"),
  ("NOR", "Norway"),
  ("GER", "Germany"),
  ("AUT", "Austria"),
  ("CAN", "Canada"),
  ("ITA", "Italy"),
  ("FRA", "France"),
  ("SWE", "Sweden"),
  ("SUI", "Switzerland"),
  ("NED", "Netherlands"),
  ("RUS", "Russia"),
  ("FIN", "Finland"),
  ("JPN", "Japan"),
  ("KOR", "South Korea"),
];

/// Display name for `noc`, or the code itself when it is not in the table.
pub fn country_name(noc: &str) -> &str {
  COUNTRY_NAMES
    .iter()
    .find(|(code, _)| *code == noc)
    .map_or(noc, |&(_, name)| name)
}
