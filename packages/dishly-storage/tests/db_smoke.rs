use uuid::Uuid;

use dishly_config::Postgres;
use dishly_storage::db::Db;
use dishly_testkit::TestDatabase;

#[tokio::test]
#[ignore = "Requires external Postgres. Set DISHLY_PG_DSN to run."]
async fn db_connects_and_bootstraps() {
	let Some(base_dsn) = dishly_testkit::env_dsn() else {
		eprintln!("Skipping db_connects_and_bootstraps; set DISHLY_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 1 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	for table in [
		"users",
		"follows",
		"dishlists",
		"dishlist_collaborators",
		"dishlist_follows",
		"dishlist_pins",
		"recipes",
		"dishlist_recipes",
	] {
		let count: i64 = sqlx::query_scalar(
			"SELECT count(*) FROM information_schema.tables WHERE table_name = $1",
		)
		.bind(table)
		.fetch_one(&db.pool)
		.await
		.expect("Failed to query schema tables.");

		assert_eq!(count, 1, "expected table {table} to exist");
	}

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set DISHLY_PG_DSN to run."]
async fn ensure_schema_is_idempotent() {
	let Some(base_dsn) = dishly_testkit::env_dsn() else {
		eprintln!("Skipping ensure_schema_is_idempotent; set DISHLY_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 1 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");
	db.ensure_schema().await.expect("Failed to re-run schema bootstrap.");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set DISHLY_PG_DSN to run."]
async fn self_follow_is_rejected() {
	let Some(base_dsn) = dishly_testkit::env_dsn() else {
		eprintln!("Skipping self_follow_is_rejected; set DISHLY_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 1 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	let user_id = Uuid::new_v4();

	sqlx::query("INSERT INTO users (user_id, username) VALUES ($1, $2)")
		.bind(user_id)
		.bind("solo")
		.execute(&db.pool)
		.await
		.expect("Failed to insert user.");

	let result = sqlx::query("INSERT INTO follows (follower_id, following_id) VALUES ($1, $1)")
		.bind(user_id)
		.execute(&db.pool)
		.await;

	assert!(result.is_err(), "expected self-follow insert to violate the check constraint");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
