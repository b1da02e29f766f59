//! Builder for content backend (GROQ) queries.
//!
//! A query is a document filter, an optional ordering, an optional slice and
//! a projection:
//!
//! ```text
//! *[_type == "post"] | order(publishedAt desc)[0...3]{_id, title}
//! ```

use super::read_time::{ReadTime, READ_TIME_BUCKETS};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Which part of the ordered result set to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    /// A single document, `[n]`
    Index(usize),
    /// Documents `start` up to but excluding `end`, `[start...end]`
    Range(usize, usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Field {
    Plain(String),
    Computed { name: String, expr: String },
}

/// Field list of a query, rendered as `{a, "b": expr, c{...}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    fields: Vec<Field>,
}

impl Projection {
    pub fn new() -> Self {
        Self::default()
    }

    /// A field taken as is. Also accepts nested projections like `mainImage{asset->{url}}`.
    pub fn field(mut self, name: &str) -> Self {
        self.fields.push(Field::Plain(name.to_string()));
        self
    }

    /// A field computed from an expression.
    pub fn computed(mut self, name: &str, expr: impl Into<String>) -> Self {
        self.fields.push(Field::Computed {
            name: name.to_string(),
            expr: expr.into(),
        });
        self
    }

    /// A reference followed into a sub-projection: `"name": reference->{...}`.
    pub fn deref(self, name: &str, reference: &str, inner: &Projection) -> Self {
        self.computed(name, format!("{}->{}", reference, inner))
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match field {
                Field::Plain(name) => f.write_str(name)?,
                Field::Computed { name, expr } => write!(f, "\"{}\": {}", name, expr)?,
            }
        }
        f.write_str("}")
    }
}

/// A document query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    filters: Vec<String>,
    order: Vec<(String, Direction)>,
    slice: Option<Slice>,
    projection: Option<Projection>,
}

impl Query {
    /// All documents of one type.
    pub fn of_type(doc_type: &str) -> Self {
        Self {
            filters: vec![format!("_type == {}", string_literal(doc_type))],
            order: Vec::new(),
            slice: None,
            projection: None,
        }
    }

    /// Add a filter condition, joined with `&&`.
    pub fn filter(mut self, condition: &str) -> Self {
        self.filters.push(condition.to_string());
        self
    }

    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order.push((field.to_string(), direction));
        self
    }

    /// Keep only the first `limit` documents.
    pub fn limit(mut self, limit: usize) -> Self {
        self.slice = Some(Slice::Range(0, limit));
        self
    }

    /// Keep only the first document; the result is an object or null.
    pub fn first(mut self) -> Self {
        self.slice = Some(Slice::Index(0));
        self
    }

    pub fn project(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "*[{}]", self.filters.join(" && "))?;

        if !self.order.is_empty() {
            let order = self
                .order
                .iter()
                .map(|(field, direction)| match direction {
                    Direction::Asc => format!("{} asc", field),
                    Direction::Desc => format!("{} desc", field),
                })
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, " | order({})", order)?;
        }

        match self.slice {
            Some(Slice::Index(i)) => write!(f, "[{}]", i)?,
            Some(Slice::Range(start, end)) => write!(f, "[{}...{}]", start, end)?,
            None => {}
        }

        if let Some(projection) = &self.projection {
            write!(f, "{}", projection)?;
        }
        Ok(())
    }
}

/// Quote a string as a query literal.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Plain text of the first two body blocks.
pub fn excerpt_expr() -> &'static str {
    "pt::text(body[0..1])"
}

/// Server-side read-time label, generated from the same buckets used locally.
pub fn read_time_expr() -> String {
    let mut arms: Vec<String> = READ_TIME_BUCKETS
        .iter()
        .map(|(bound, bucket)| {
            format!(
                "length(pt::text(body)) < {} => {}",
                bound,
                string_literal(bucket.label())
            )
        })
        .collect();
    arms.push(string_literal(ReadTime::VeryLong.label()));
    format!("select({})", arms.join(", "))
}
