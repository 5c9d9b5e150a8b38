//! Builds parameterized INSERT, SELECT, UPDATE, DELETE and list statements from a table descriptor.

use crate::filters::SortDirection;
use crate::sql::PgBindValue;

/// Static description of an entity table. Identifiers come from code only; values are always parameters.
#[derive(Debug, Clone, Copy)]
pub struct Table {
    pub name: &'static str,
    /// Business columns, in the order records produce their bind values.
    pub columns: &'static [&'static str],
    /// Column matched by the full-text search on list.
    pub search_column: &'static str,
}

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: PgBindValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// id, created_at, business columns, version: the shape every record is read back in.
pub fn select_column_list(table: &Table) -> String {
    std::iter::once("id")
        .chain(std::iter::once("created_at"))
        .chain(table.columns.iter().copied())
        .chain(std::iter::once("version"))
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// INSERT of all business columns; server-populated fields come back through RETURNING.
pub fn insert(table: &Table, values: Vec<PgBindValue>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let placeholders: Vec<String> = values
        .into_iter()
        .map(|v| format!("${}", q.push_param(v)))
        .collect();
    let cols: Vec<String> = table.columns.iter().map(|c| quoted(c)).collect();
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING \"id\", \"created_at\", \"version\"",
        quoted(table.name),
        cols.join(", "),
        placeholders.join(", ")
    );
    q
}

pub fn select_by_id(table: &Table, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(PgBindValue::I64(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE \"id\" = ${}",
        select_column_list(table),
        quoted(table.name),
        n
    );
    q
}

/// UPDATE of all business columns guarded by the version the caller read.
/// Matches zero rows when another writer got there first or the row is gone.
pub fn update(table: &Table, values: Vec<PgBindValue>, id: i64, version: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets: Vec<String> = Vec::with_capacity(table.columns.len() + 1);
    for (col, v) in table.columns.iter().zip(values) {
        let n = q.push_param(v);
        sets.push(format!("{} = ${}", quoted(col), n));
    }
    sets.push("\"version\" = \"version\" + 1".to_string());
    let id_param = q.push_param(PgBindValue::I64(id));
    let version_param = q.push_param(PgBindValue::I32(version));
    q.sql = format!(
        "UPDATE {} SET {} WHERE \"id\" = ${} AND \"version\" = ${} RETURNING \"version\"",
        quoted(table.name),
        sets.join(", "),
        id_param,
        version_param
    );
    q
}

pub fn delete(table: &Table, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(PgBindValue::I64(id));
    q.sql = format!("DELETE FROM {} WHERE \"id\" = ${}", quoted(table.name), n);
    q
}

/// Paged list with full-text search on the search column (empty search matches everything),
/// ordered by the given column then id, with the total match count in a `total_records` window column.
/// `sort_column` must already be checked against the resource safelist.
pub fn select_list(
    table: &Table,
    search: &str,
    sort_column: &str,
    direction: SortDirection,
    limit: i64,
    offset: i64,
) -> QueryBuf {
    let mut q = QueryBuf::new();
    let search_param = q.push_param(PgBindValue::from(search));
    let limit_param = q.push_param(PgBindValue::I64(limit));
    let offset_param = q.push_param(PgBindValue::I64(offset));
    let search_col = quoted(table.search_column);
    q.sql = format!(
        "SELECT count(*) OVER() AS \"total_records\", {} FROM {} \
         WHERE (to_tsvector('simple', {}) @@ plainto_tsquery('simple', ${s}) OR ${s} = '') \
         ORDER BY {} {}, \"id\" ASC LIMIT ${} OFFSET ${}",
        select_column_list(table),
        quoted(table.name),
        search_col,
        quoted(sort_column),
        direction.as_sql(),
        limit_param,
        offset_param,
        s = search_param,
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDGETS: Table = Table {
        name: "widgets",
        columns: &["name", "weight"],
        search_column: "name",
    };

    #[test]
    fn insert_returns_server_fields() {
        let q = insert(&WIDGETS, vec!["bolt".into(), 2.5_f64.into()]);
        assert_eq!(
            q.sql,
            "INSERT INTO \"widgets\" (\"name\", \"weight\") VALUES ($1, $2) RETURNING \"id\", \"created_at\", \"version\""
        );
        assert_eq!(q.params.len(), 2);
    }

    #[test]
    fn update_is_guarded_by_version() {
        let q = update(&WIDGETS, vec!["bolt".into(), 2.5_f64.into()], 7, 3);
        assert_eq!(
            q.sql,
            "UPDATE \"widgets\" SET \"name\" = $1, \"weight\" = $2, \"version\" = \"version\" + 1 \
             WHERE \"id\" = $3 AND \"version\" = $4 RETURNING \"version\""
        );
        assert_eq!(q.params[2], PgBindValue::I64(7));
        assert_eq!(q.params[3], PgBindValue::I32(3));
    }

    #[test]
    fn select_by_id_and_delete() {
        let q = select_by_id(&WIDGETS, 4);
        assert_eq!(
            q.sql,
            "SELECT \"id\", \"created_at\", \"name\", \"weight\", \"version\" FROM \"widgets\" WHERE \"id\" = $1"
        );
        assert_eq!(q.params, vec![PgBindValue::I64(4)]);

        let q = delete(&WIDGETS, 4);
        assert_eq!(q.sql, "DELETE FROM \"widgets\" WHERE \"id\" = $1");
    }

    #[test]
    fn list_orders_with_id_tiebreak() {
        let q = select_list(&WIDGETS, "", "weight", SortDirection::Desc, 20, 40);
        assert!(q.sql.starts_with("SELECT count(*) OVER() AS \"total_records\", \"id\""));
        assert!(q.sql.contains("plainto_tsquery('simple', $1) OR $1 = ''"));
        assert!(q.sql.ends_with("ORDER BY \"weight\" DESC, \"id\" ASC LIMIT $2 OFFSET $3"));
        assert_eq!(
            q.params,
            vec![PgBindValue::Text(String::new()), PgBindValue::I64(20), PgBindValue::I64(40)]
        );
    }
}
