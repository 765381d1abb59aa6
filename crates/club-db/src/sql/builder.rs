//! WHERE / SET / ORDER BY fragments on top of `sqlx::QueryBuilder`

use club_core::{Page, SortOrder};
use sqlx::{Encode, Postgres, QueryBuilder, Type};

/// Accumulates AND-combined predicates, emitting `WHERE` before the first one
pub struct Conditions<'a, 'args> {
    qb: &'a mut QueryBuilder<'args, Postgres>,
    started: bool,
}

impl<'a, 'args> Conditions<'a, 'args> {
    pub fn new(qb: &'a mut QueryBuilder<'args, Postgres>) -> Self {
        Self { qb, started: false }
    }

    fn next(&mut self) -> &mut QueryBuilder<'args, Postgres> {
        self.qb.push(if self.started { " AND " } else { " WHERE " });
        self.started = true;
        &mut *self.qb
    }

    fn compare<T>(&mut self, column: &str, op: &str, value: Option<T>)
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        if let Some(value) = value {
            self.next()
                .push(column)
                .push(" ")
                .push(op)
                .push(" ")
                .push_bind(value);
        }
    }

    /// `column = value`
    pub fn eq<T>(&mut self, column: &str, value: Option<T>)
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        self.compare(column, "=", value);
    }

    /// `column >= value`
    pub fn gte<T>(&mut self, column: &str, value: Option<T>)
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        self.compare(column, ">=", value);
    }

    /// `column <= value`
    pub fn lte<T>(&mut self, column: &str, value: Option<T>)
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        self.compare(column, "<=", value);
    }

    /// `column < value`
    pub fn lt<T>(&mut self, column: &str, value: Option<T>)
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        self.compare(column, "<", value);
    }

    /// `column = ANY(values)`; an empty list matches nothing
    pub fn any<T>(&mut self, column: &str, values: Option<Vec<T>>)
    where
        Vec<T>: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        if let Some(values) = values {
            self.next()
                .push(column)
                .push(" = ANY(")
                .push_bind(values)
                .push(")");
        }
    }

    /// `value = ANY(array_column)`
    pub fn array_contains<T>(&mut self, array_column: &str, value: Option<T>)
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        if let Some(value) = value {
            self.next()
                .push_bind(value)
                .push(" = ANY(")
                .push(array_column)
                .push(")");
        }
    }

    /// `column IS NOT NULL` when true, `column IS NULL` when false
    pub fn is_set(&mut self, column: &str, value: Option<bool>) {
        if let Some(set) = value {
            self.next()
                .push(column)
                .push(if set { " IS NOT NULL" } else { " IS NULL" });
        }
    }

    /// Case-insensitive substring match on any of `columns`
    pub fn search(&mut self, columns: &[&str], needle: Option<&str>) {
        let Some(needle) = needle.map(str::trim).filter(|n| !n.is_empty()) else {
            return;
        };
        let pattern = format!("%{}%", escape_like(needle));

        let qb = self.next();
        qb.push("(");
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                qb.push(" OR ");
            }
            qb.push(*column).push(" ILIKE ").push_bind(pattern.clone());
        }
        qb.push(")");
    }
}

/// Escape `%`, `_` and `\` for use inside an ILIKE pattern
pub fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Accumulates `column = value` pairs of an UPDATE ... SET
pub struct Assignments<'a, 'args> {
    qb: &'a mut QueryBuilder<'args, Postgres>,
    count: usize,
}

impl<'a, 'args> Assignments<'a, 'args> {
    pub fn new(qb: &'a mut QueryBuilder<'args, Postgres>) -> Self {
        Self { qb, count: 0 }
    }

    fn next(&mut self, column: &str) -> &mut QueryBuilder<'args, Postgres> {
        if self.count > 0 {
            self.qb.push(", ");
        }
        self.count += 1;
        self.qb.push(column).push(" = ")
    }

    /// Assign when `value` is present
    pub fn set<T>(&mut self, column: &str, value: Option<T>)
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        if let Some(value) = value {
            self.next(column).push_bind(value);
        }
    }

    /// Assign a nullable column: `Some(None)` writes NULL
    pub fn set_nullable<T>(&mut self, column: &str, value: Option<Option<T>>)
    where
        Option<T>: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        if let Some(value) = value {
            self.next(column).push_bind(value);
        }
    }

    /// Raw SQL expression, e.g. `NOW()`
    pub fn set_raw(&mut self, column: &str, expr: &str) {
        self.next(column).push(expr);
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Close the SET list; `touch` names the `updated_at` column if the table has one
    ///
    /// A SET list may not be empty, so `noop_column = noop_expr` is written
    /// when nothing else was. Inside `ON CONFLICT DO UPDATE` the expression
    /// must be table-qualified.
    pub fn finish(mut self, touch: Option<&str>, noop_column: &str, noop_expr: &str) {
        if let Some(column) = touch {
            self.set_raw(column, "NOW()");
        }
        if self.is_empty() {
            self.set_raw(noop_column, noop_expr);
        }
    }
}

/// Sortable column of an entity
pub trait OrderColumn {
    fn column(&self) -> &'static str;
}

/// ` ORDER BY <column> <dir>, id <dir>` so equal keys page stably
pub fn push_order<O: OrderColumn>(
    qb: &mut QueryBuilder<'_, Postgres>,
    order_by: &O,
    order: SortOrder,
) {
    let column = order_by.column();
    qb.push(" ORDER BY ").push(column).push(" ").push(order.as_sql());
    if column != "id" {
        qb.push(", id ").push(order.as_sql());
    }
}

/// ` LIMIT $n OFFSET $m`
pub fn push_page(qb: &mut QueryBuilder<'_, Postgres>, page: Page) {
    qb.push(" LIMIT ")
        .push_bind(page.take)
        .push(" OFFSET ")
        .push_bind(page.skip);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conditions_prefix() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM terms");
        {
            let mut c = Conditions::new(&mut qb);
            c.eq("term_name", Some("Fall 2025".to_string()));
            c.eq::<i64>("id", None);
            c.is_set("submitted_at", Some(false));
        }
        assert_eq!(
            qb.sql(),
            "SELECT * FROM terms WHERE term_name = $1 AND submitted_at IS NULL"
        );
    }

    #[test]
    fn test_search_and_any() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT 1 FROM profiles");
        {
            let mut c = Conditions::new(&mut qb);
            c.any("id", Some(vec![1_i64, 2]));
            c.search(&["first_name", "last_name"], Some(" ada "));
            c.search(&["first_name"], Some("   "));
        }
        assert_eq!(
            qb.sql(),
            "SELECT 1 FROM profiles WHERE id = ANY($1) AND (first_name ILIKE $2 OR last_name ILIKE $3)"
        );
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }

    #[test]
    fn test_assignments_finish() {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE terms SET ");
        let mut s = Assignments::new(&mut qb);
        s.set("term_name", Some("W26".to_string()));
        s.set_nullable::<String>("comments", Some(None));
        s.finish(Some("updated_at"), "id", "id");
        assert_eq!(
            qb.sql(),
            "UPDATE terms SET term_name = $1, comments = $2, updated_at = NOW()"
        );

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE event_attendance SET ");
        Assignments::new(&mut qb).finish(None, "id", "id");
        assert_eq!(qb.sql(), "UPDATE event_attendance SET id = id");

        let mut qb = QueryBuilder::<Postgres>::new("DO UPDATE SET ");
        Assignments::new(&mut qb).finish(None, "id", "questions.id");
        assert_eq!(qb.sql(), "DO UPDATE SET id = questions.id");
    }

    #[test]
    fn test_order_and_page() {
        struct ByName;
        impl OrderColumn for ByName {
            fn column(&self) -> &'static str {
                "name"
            }
        }

        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM events");
        push_order(&mut qb, &ByName, SortOrder::Desc);
        push_page(&mut qb, Page::new(10, 0));
        assert_eq!(
            qb.sql(),
            "SELECT * FROM events ORDER BY name DESC, id DESC LIMIT $1 OFFSET $2"
        );
    }
}
