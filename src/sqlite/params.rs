use crate::error::SqlFacadeError;
use crate::types::RowValues;

/// Convert a single `RowValues` into a driver value.
///
/// Booleans are stored as 0/1 integers and timestamps as
/// `YYYY-MM-DD HH:MM:SS[.fff]` text, matching what the result extraction path
/// reads back.
#[must_use]
pub fn row_value_to_sqlite_value(value: &RowValues) -> rusqlite::types::Value {
    match value {
        RowValues::Int(i) => rusqlite::types::Value::Integer(*i),
        RowValues::Float(f) => rusqlite::types::Value::Real(*f),
        RowValues::Text(s) => rusqlite::types::Value::Text(s.clone()),
        RowValues::Bool(b) => rusqlite::types::Value::Integer(i64::from(*b)),
        RowValues::Timestamp(dt) => {
            rusqlite::types::Value::Text(dt.format("%F %T%.f").to_string())
        }
        RowValues::Null => rusqlite::types::Value::Null,
        RowValues::JSON(jval) => rusqlite::types::Value::Text(jval.to_string()),
        RowValues::Blob(bytes) => rusqlite::types::Value::Blob(bytes.clone()),
    }
}

/// Owned driver parameters, ready to bind.
///
/// The only way user values reach the driver: a SQL template plus a `Params`
/// built from `RowValues`. Nothing in this crate splices values into SQL text.
#[derive(Debug, Clone)]
pub struct Params(pub Vec<rusqlite::types::Value>);

impl Params {
    /// Convert facade row values into driver values.
    ///
    /// # Errors
    /// Returns `SqlFacadeError::ParameterError` if conversion fails.
    pub fn convert(params: &[RowValues]) -> Result<Self, SqlFacadeError> {
        let mut vec_values = Vec::with_capacity(params.len());
        for p in params {
            vec_values.push(row_value_to_sqlite_value(p));
        }
        Ok(Params(vec_values))
    }

    /// Borrow the underlying values.
    #[must_use]
    pub fn as_values(&self) -> &[rusqlite::types::Value] {
        &self.0
    }

    /// Build a borrowed params slice suitable for driver execution.
    #[must_use]
    pub fn as_refs(&self) -> Vec<&dyn rusqlite::ToSql> {
        self.0.iter().map(|v| v as &dyn rusqlite::ToSql).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_stays_null() {
        let converted = Params::convert(&[RowValues::Null]).unwrap();
        assert!(matches!(
            converted.as_values()[0],
            rusqlite::types::Value::Null
        ));
    }

    #[test]
    fn bool_binds_as_integer() {
        let converted =
            Params::convert(&[RowValues::Bool(true), RowValues::Bool(false)]).unwrap();
        assert_eq!(
            converted.as_values(),
            &[
                rusqlite::types::Value::Integer(1),
                rusqlite::types::Value::Integer(0)
            ][..]
        );
    }
}
