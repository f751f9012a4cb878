use serde_json::Value;

/// One entry of a recipe's ingredient list. User-authored recipes carry
/// either plain strings or `{type, text}` records; anything else is kept
/// verbatim and contributes no text. Entries typed `header` contribute
/// their text like any other entry.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum IngredientEntry {
	Plain(String),
	Structured {
		#[serde(rename = "type")]
		kind: String,
		text: String,
	},
	Other(Value),
}
impl IngredientEntry {
	pub fn text(&self) -> Option<&str> {
		match self {
			Self::Plain(text) => Some(text),
			Self::Structured { text, .. } => Some(text),
			Self::Other(_) => None,
		}
	}
}

/// Parses a raw JSON ingredient column. Non-array payloads and malformed
/// entries degrade to no-match rather than failing the candidate.
pub fn parse_entries(raw: &Value) -> Vec<IngredientEntry> {
	let Some(items) = raw.as_array() else { return Vec::new() };

	items
		.iter()
		.map(|item| {
			serde_json::from_value(item.clone()).unwrap_or_else(|_| IngredientEntry::Other(item.clone()))
		})
		.collect()
}

/// Parses a raw JSON tag column, keeping only string entries.
pub fn parse_tags(raw: &Value) -> Vec<String> {
	let Some(items) = raw.as_array() else { return Vec::new() };

	items.iter().filter_map(Value::as_str).map(str::to_string).collect()
}
