use clientele_store::migrate::latest_version;
use clientele_store::Store;

#[test]
fn migrations_apply_once() {
    let store = Store::open_in_memory().expect("open in memory");
    assert_eq!(store.schema_version().expect("version before"), 0);
    store.migrate().expect("migrate");
    store.migrate().expect("migrate again");

    let version: i64 = store
        .connection()
        .query_row("SELECT version FROM clientele_schema LIMIT 1;", [], |row| {
            row.get(0)
        })
        .expect("schema version");
    assert_eq!(version, latest_version());
    assert_eq!(store.schema_version().expect("version"), latest_version());
}

#[test]
fn schema_has_one_table_per_entity() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    for table in ["customers", "appointments", "tasks", "communications"] {
        let count: i64 = store
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1;",
                [table],
                |row| row.get(0),
            )
            .expect("lookup table");
        assert_eq!(count, 1, "missing table {table}");
    }
}
