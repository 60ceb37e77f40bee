use serde::Serialize;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;
pub mod views;

use table::TableOptions;

/// A response that knows how to lay itself out as a terminal table.
pub trait Tabular {
    fn to_table(&self, options: TableOptions) -> String;
}

/// Render a response to a string in the requested format.
pub fn render<T>(value: &T, format: OutputFormat, options: TableOptions) -> anyhow::Result<String>
where
    T: Serialize + Tabular,
{
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(value.to_table(options)),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a response in the requested format.
pub fn output<T>(value: &T, format: OutputFormat) -> anyhow::Result<()>
where
    T: Serialize + Tabular,
{
    let rendered = render(value, format, table_options())?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> TableOptions {
    let prefs = ui::prefs();
    TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use super::{Tabular, render};
    use crate::cli::OutputFormat;
    use crate::output::table::TableOptions;

    #[derive(Serialize)]
    struct Sample {
        id: &'static str,
        count: u32,
    }

    impl Tabular for Sample {
        fn to_table(&self, _options: TableOptions) -> String {
            format!("{} = {}", self.id, self.count)
        }
    }

    const OPTIONS: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn json_is_pretty() {
        let rendered = render(&Sample { id: "a", count: 2 }, OutputFormat::Json, OPTIONS).unwrap();
        assert!(rendered.contains('\n'));
        assert!(rendered.contains("\"count\": 2"));
    }

    #[test]
    fn raw_is_compact() {
        let rendered = render(&Sample { id: "a", count: 2 }, OutputFormat::Raw, OPTIONS).unwrap();
        assert_eq!(rendered, r#"{"id":"a","count":2}"#);
    }

    #[test]
    fn table_delegates_to_the_response() {
        let rendered = render(&Sample { id: "a", count: 2 }, OutputFormat::Table, OPTIONS).unwrap();
        assert_eq!(rendered, "a = 2");
    }
}
