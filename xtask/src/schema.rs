// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schema introspection for migration parity checks.
//!
//! Column types are normalized to `integer` or `text`. Non-unique indexes
//! are not compared because `MySQL` creates its own for foreign keys.
//! `SQLite` compares text byte for byte, so every `MySQL` text column must
//! use a binary collation.

use std::collections::{BTreeMap, BTreeSet};

use color_eyre::{eyre::Context, Result};
use diesel::sql_types::{Integer, Nullable, Text};
use diesel::{Connection, MysqlConnection, QueryableByName, RunQueryDsl, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

const SQLITE_MIGRATIONS: EmbeddedMigrations =
    embed_migrations!("../crates/persistence/migrations");
const MYSQL_MIGRATIONS: EmbeddedMigrations =
    embed_migrations!("../crates/persistence/migrations_mysql");

const MIGRATIONS_TABLE: &str = "__diesel_schema_migrations";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    normalized_type: String,
    nullable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: BTreeMap<String, Column>,
    unique_constraints: BTreeSet<Vec<String>>,
    non_binary_collations: BTreeMap<String, String>,
}

pub type Schema = BTreeMap<String, Table>;

fn normalize_sqlite_type(raw: &str) -> String {
    let upper: String = raw.to_uppercase();
    if upper.contains("INT") {
        String::from("integer")
    } else {
        String::from("text")
    }
}

fn normalize_mysql_type(raw: &str) -> String {
    match raw.to_lowercase().as_str() {
        "bigint" | "int" | "integer" | "smallint" | "tinyint" => String::from("integer"),
        _ => String::from("text"),
    }
}

/// Applies `migrations/` to an in-memory `SQLite` database and reads back
/// its schema.
pub fn sqlite_schema() -> Result<Schema> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        r#type: String,
        #[diesel(sql_type = Integer)]
        notnull: i32,
    }

    #[derive(QueryableByName)]
    struct IndexInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Integer)]
        unique: i32,
    }

    #[derive(QueryableByName)]
    struct IndexColumn {
        #[diesel(sql_type = Text)]
        name: String,
    }

    tracing::info!("Applying SQLite migrations");
    let mut conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;
    conn.run_pending_migrations(SQLITE_MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to apply SQLite migrations: {e}"))?;

    let tables: Vec<TableName> = diesel::sql_query(format!(
        "SELECT name FROM sqlite_master WHERE type = 'table' \
         AND name NOT LIKE 'sqlite_%' AND name != '{MIGRATIONS_TABLE}' ORDER BY name"
    ))
    .load(&mut conn)
    .wrap_err("Failed to query SQLite tables")?;

    let mut schema: Schema = Schema::new();
    for table in tables {
        let mut info: Table = Table::default();

        let columns: Vec<ColumnInfo> =
            diesel::sql_query(format!("PRAGMA table_info({})", table.name))
                .load(&mut conn)
                .wrap_err(format!("Failed to get columns for table {}", table.name))?;
        for column in columns {
            info.columns.insert(
                column.name,
                Column {
                    normalized_type: normalize_sqlite_type(&column.r#type),
                    nullable: column.notnull == 0,
                },
            );
        }

        let indexes: Vec<IndexInfo> =
            diesel::sql_query(format!("PRAGMA index_list({})", table.name))
                .load(&mut conn)
                .wrap_err(format!("Failed to get indexes for table {}", table.name))?;
        for index in indexes.into_iter().filter(|index| index.unique != 0) {
            let columns: Vec<IndexColumn> =
                diesel::sql_query(format!("PRAGMA index_info({})", index.name))
                    .load(&mut conn)
                    .wrap_err(format!("Failed to get index columns for {}", index.name))?;
            info.unique_constraints
                .insert(columns.into_iter().map(|c| c.name).collect());
        }

        schema.insert(table.name, info);
    }

    Ok(schema)
}

/// Applies `migrations_mysql/` to the database at `database_url` and reads
/// back its schema.
pub fn mysql_schema(database_url: &str, database: &str) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        table_name: String,
        #[diesel(sql_type = Text)]
        column_name: String,
        #[diesel(sql_type = Text)]
        data_type: String,
        #[diesel(sql_type = Text)]
        is_nullable: String,
        #[diesel(sql_type = Nullable<Text>)]
        collation_name: Option<String>,
    }

    #[derive(QueryableByName)]
    struct UniqueColumn {
        #[diesel(sql_type = Text)]
        table_name: String,
        #[diesel(sql_type = Text)]
        index_name: String,
        #[diesel(sql_type = Text)]
        column_name: String,
    }

    tracing::info!("Applying MySQL migrations");
    let mut conn =
        MysqlConnection::establish(database_url).wrap_err("Failed to connect to MariaDB")?;
    conn.run_pending_migrations(MYSQL_MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to apply MySQL migrations: {e}"))?;

    let columns: Vec<ColumnInfo> = diesel::sql_query(
        "SELECT table_name AS table_name, column_name AS column_name, \
         data_type AS data_type, is_nullable AS is_nullable, \
         collation_name AS collation_name \
         FROM information_schema.columns WHERE table_schema = ? AND table_name != ? \
         ORDER BY table_name, ordinal_position",
    )
    .bind::<Text, _>(database)
    .bind::<Text, _>(MIGRATIONS_TABLE)
    .load(&mut conn)
    .wrap_err("Failed to query MySQL columns")?;

    let mut schema: Schema = Schema::new();
    for column in columns {
        let table: &mut Table = schema.entry(column.table_name).or_default();
        if let Some(collation) = column.collation_name.filter(|c| !c.ends_with("_bin")) {
            table
                .non_binary_collations
                .insert(column.column_name.clone(), collation);
        }
        table.columns.insert(
            column.column_name,
            Column {
                normalized_type: normalize_mysql_type(&column.data_type),
                nullable: column.is_nullable == "YES",
            },
        );
    }

    let unique_columns: Vec<UniqueColumn> = diesel::sql_query(
        "SELECT table_name AS table_name, index_name AS index_name, column_name AS column_name \
         FROM information_schema.statistics \
         WHERE table_schema = ? AND table_name != ? AND non_unique = 0 AND index_name != 'PRIMARY' \
         ORDER BY table_name, index_name, seq_in_index",
    )
    .bind::<Text, _>(database)
    .bind::<Text, _>(MIGRATIONS_TABLE)
    .load(&mut conn)
    .wrap_err("Failed to query MySQL unique indexes")?;

    let mut grouped: BTreeMap<(String, String), Vec<String>> = BTreeMap::new();
    for unique in unique_columns {
        grouped
            .entry((unique.table_name, unique.index_name))
            .or_default()
            .push(unique.column_name);
    }
    for ((table_name, _), columns) in grouped {
        schema
            .entry(table_name)
            .or_default()
            .unique_constraints
            .insert(columns);
    }

    Ok(schema)
}

/// Fails with a list of every difference between the two schemas.
pub fn compare(sqlite: &Schema, mysql: &Schema) -> Result<()> {
    let mut differences: Vec<String> = Vec::new();

    let table_names: BTreeSet<&String> = sqlite.keys().chain(mysql.keys()).collect();
    for name in table_names {
        match (sqlite.get(name), mysql.get(name)) {
            (Some(_), None) => differences.push(format!("table {name} missing from MySQL")),
            (None, Some(_)) => differences.push(format!("table {name} missing from SQLite")),
            (Some(left), Some(right)) => compare_tables(name, left, right, &mut differences),
            (None, None) => {}
        }
    }

    if differences.is_empty() {
        return Ok(());
    }
    for difference in &differences {
        tracing::error!("{difference}");
    }
    Err(color_eyre::eyre::eyre!(
        "Schema mismatch: {} difference(s) found",
        differences.len()
    ))
}

fn compare_tables(name: &str, sqlite: &Table, mysql: &Table, differences: &mut Vec<String>) {
    let column_names: BTreeSet<&String> =
        sqlite.columns.keys().chain(mysql.columns.keys()).collect();
    for column in column_names {
        match (sqlite.columns.get(column), mysql.columns.get(column)) {
            (Some(left), Some(right)) if left != right => differences.push(format!(
                "{name}.{column}: SQLite {left:?} vs MySQL {right:?}"
            )),
            (Some(_), None) => differences.push(format!("{name}.{column} missing from MySQL")),
            (None, Some(_)) => differences.push(format!("{name}.{column} missing from SQLite")),
            _ => {}
        }
    }

    for (column, collation) in &mysql.non_binary_collations {
        differences.push(format!(
            "{name}.{column}: MySQL collation {collation} does not compare exactly"
        ));
    }

    if sqlite.unique_constraints != mysql.unique_constraints {
        differences.push(format!(
            "{name} unique constraints: SQLite {:?} vs MySQL {:?}",
            sqlite.unique_constraints, mysql.unique_constraints
        ));
    }
}
