pub fn render_schema() -> String {
	let init = include_str!("../../../sql/init.sql");

	expand_includes(init)
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"tables/001_users.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_users.sql")),
				"tables/002_follows.sql" =>
					out.push_str(include_str!("../../../sql/tables/002_follows.sql")),
				"tables/003_dishlists.sql" =>
					out.push_str(include_str!("../../../sql/tables/003_dishlists.sql")),
				"tables/004_dishlist_collaborators.sql" => out
					.push_str(include_str!("../../../sql/tables/004_dishlist_collaborators.sql")),
				"tables/005_dishlist_follows.sql" =>
					out.push_str(include_str!("../../../sql/tables/005_dishlist_follows.sql")),
				"tables/006_dishlist_pins.sql" =>
					out.push_str(include_str!("../../../sql/tables/006_dishlist_pins.sql")),
				"tables/007_recipes.sql" =>
					out.push_str(include_str!("../../../sql/tables/007_recipes.sql")),
				"tables/008_dishlist_recipes.sql" =>
					out.push_str(include_str!("../../../sql/tables/008_dishlist_recipes.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}
