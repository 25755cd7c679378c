use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;

use crate::view::escape;

/// 表格单元格，字段缺失与空值可区分
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Value(String),
    FieldNotFound(String),
}

impl Cell {
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Cell::Value(v) => Some(v),
            Cell::FieldNotFound(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("column \"{column}\" refers to unknown field \"{field}\"")]
    FieldNotFound { column: String, field: String },
}

type Extractor<T> = Box<dyn Fn(&T) -> Cell + Send + Sync>;

/// 表格列：标题加取值函数
pub struct TableColumn<T> {
    title: String,
    extract: Extractor<T>,
}

impl<T> TableColumn<T> {
    pub fn new<F>(title: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
        T: 'static,
    {
        Self {
            title: title.into(),
            extract: Box::new(move |row: &T| Cell::Value(accessor(row))),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self, row: &T) -> Cell {
        (self.extract)(row)
    }
}

impl<T: Serialize + 'static> TableColumn<T> {
    /// 按字段名取值，字段名对应行的序列化结果中的键
    pub fn field(title: impl Into<String>, field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            title: title.into(),
            extract: Box::new(move |row: &T| field_value(row, &field)),
        }
    }
}

fn field_value<T: Serialize>(row: &T, field: &str) -> Cell {
    let value = match serde_json::to_value(row) {
        Ok(Value::Object(mut map)) => map.remove(field),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!("Row could not be serialized for field {}: {}", field, e);
            None
        }
    };

    match value {
        Some(Value::String(s)) => Cell::Value(s),
        Some(Value::Null) => Cell::Value(String::new()),
        Some(other) => Cell::Value(other.to_string()),
        None => Cell::FieldNotFound(field.to_string()),
    }
}

/// 带标题的数据表，列顺序即添加顺序
pub struct TableList<T> {
    title: String,
    show_header: bool,
    show_footer: bool,
    columns: Vec<TableColumn<T>>,
    data: Vec<T>,
}

impl<T> TableList<T> {
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_options(title, true, false)
    }

    pub fn with_options(title: impl Into<String>, show_header: bool, show_footer: bool) -> Self {
        Self {
            title: title.into(),
            show_header,
            show_footer,
            columns: Vec::new(),
            data: Vec::new(),
        }
    }

    pub fn add_column(&mut self, column: TableColumn<T>) {
        self.columns.push(column);
    }

    pub fn column(mut self, column: TableColumn<T>) -> Self {
        self.add_column(column);
        self
    }

    pub fn set_data(&mut self, data: impl IntoIterator<Item = T>) {
        self.data = data.into_iter().collect();
    }

    pub fn data(mut self, data: impl IntoIterator<Item = T>) -> Self {
        self.set_data(data);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn show_header(&self) -> bool {
        self.show_header
    }

    pub fn show_footer(&self) -> bool {
        self.show_footer
    }

    pub fn headings(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.title()).collect()
    }

    pub fn rows(&self) -> Vec<Vec<Cell>> {
        self.data
            .iter()
            .map(|row| self.columns.iter().map(|c| c.content(row)).collect())
            .collect()
    }

    /// 与 `rows` 相同，但遇到缺失字段直接返回错误
    pub fn try_rows(&self) -> Result<Vec<Vec<String>>, TableError> {
        self.data
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|column| match column.content(row) {
                        Cell::Value(v) => Ok(v),
                        Cell::FieldNotFound(field) => Err(TableError::FieldNotFound {
                            column: column.title().to_string(),
                            field,
                        }),
                    })
                    .collect()
            })
            .collect()
    }

    pub fn render(&self) -> String {
        Table {
            title: &self.title,
            show_header: self.show_header,
            show_footer: self.show_footer,
            headings: &self.headings(),
            rows: &self.rows(),
        }
        .render()
    }
}

/// 表格卡片
pub struct Table<'a> {
    pub title: &'a str,
    pub show_header: bool,
    pub show_footer: bool,
    pub headings: &'a [&'a str],
    pub rows: &'a [Vec<Cell>],
}

impl Table<'_> {
    pub fn render(&self) -> String {
        let heading_row = format!(
            "<tr>{}</tr>",
            self.headings
                .iter()
                .map(|h| format!("<th>{}</th>", escape(h)))
                .collect::<String>()
        );

        let mut missing = BTreeSet::new();
        let mut body = String::new();
        for row in self.rows {
            body.push_str("<tr>");
            for cell in row {
                match cell {
                    Cell::Value(v) => body.push_str(&format!("<td>{}</td>", escape(v))),
                    Cell::FieldNotFound(field) => {
                        missing.insert(field.as_str());
                        body.push_str(&format!(
                            "<td class=\"text-danger\" title=\"unknown field: {}\">?</td>",
                            escape(field)
                        ));
                    }
                }
            }
            body.push_str("</tr>");
        }
        for field in missing {
            tracing::warn!("Table \"{}\" has no field \"{}\"", self.title, field);
        }

        let thead = if self.show_header {
            format!("<thead>{}</thead>", heading_row)
        } else {
            String::new()
        };
        let tfoot = if self.show_footer {
            format!("<tfoot>{}</tfoot>", heading_row)
        } else {
            String::new()
        };

        format!(
            "<div class=\"card mb-4\">\
             <div class=\"card-header\"><i class=\"fas fa-table mr-1\"></i>{title}</div>\
             <div class=\"card-body\"><div class=\"table-responsive\">\
             <table class=\"table table-bordered data-table\" width=\"100%\" cellspacing=\"0\">\
             {thead}{tfoot}<tbody>{body}</tbody></table></div></div></div>",
            title = escape(self.title),
        )
    }
}
