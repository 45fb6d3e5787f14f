use std::error::Error;

use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};
use tokio_util::bytes;

use crate::types::RowValues;

/// Borrowed view of `RowValues` in the shape tokio-postgres binds.
pub struct Params<'a> {
    references: Vec<&'a (dyn ToSql + Sync)>,
}

impl<'a> Params<'a> {
    #[must_use]
    pub fn convert(params: &'a [RowValues]) -> Params<'a> {
        let references = params.iter().map(|p| p as &(dyn ToSql + Sync)).collect();
        Params { references }
    }

    #[must_use]
    pub fn as_refs(&self) -> &[&(dyn ToSql + Sync)] {
        &self.references
    }
}

fn narrow<T: TryFrom<i64>>(value: i64, ty: &Type) -> Result<T, Box<dyn Error + Sync + Send>> {
    T::try_from(value).map_err(|_| format!("integer {value} out of range for {ty}").into())
}

impl ToSql for RowValues {
    // Postgres infers each placeholder's type from the statement, so integers are narrowed to
    // the column width (`owner_id = $2` binds as int4) and widened for float columns.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut bytes::BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            RowValues::Int(i) => match *ty {
                Type::INT2 => narrow::<i16>(*i, ty)?.to_sql(ty, out),
                Type::INT4 => narrow::<i32>(*i, ty)?.to_sql(ty, out),
                Type::FLOAT4 => (*i as f32).to_sql(ty, out),
                Type::FLOAT8 => (*i as f64).to_sql(ty, out),
                _ => i.to_sql(ty, out),
            },
            RowValues::Float(f) => match *ty {
                Type::FLOAT4 => (*f as f32).to_sql(ty, out),
                _ => f.to_sql(ty, out),
            },
            RowValues::Text(s) => s.to_sql(ty, out),
            RowValues::Bool(b) => b.to_sql(ty, out),
            RowValues::Timestamp(dt) => match *ty {
                Type::DATE => dt.date().to_sql(ty, out),
                _ => dt.to_sql(ty, out),
            },
            RowValues::Null => Ok(IsNull::Yes),
            RowValues::JSON(jsval) => jsval.to_sql(ty, out),
            RowValues::Blob(bytes) => bytes.to_sql(ty, out),
        }
    }

    fn accepts(ty: &Type) -> bool {
        matches!(
            *ty,
            Type::INT2
                | Type::INT4
                | Type::INT8
                | Type::FLOAT4
                | Type::FLOAT8
                | Type::TEXT
                | Type::VARCHAR
                | Type::BPCHAR
                | Type::NAME
                | Type::BOOL
                | Type::TIMESTAMP
                | Type::DATE
                | Type::JSON
                | Type::JSONB
                | Type::BYTEA
        )
    }

    to_sql_checked!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_narrow_to_the_column_width() {
        let mut buf = bytes::BytesMut::new();
        RowValues::Int(8550).to_sql(&Type::INT4, &mut buf).unwrap();
        assert_eq!(buf.as_ref(), 8550_i32.to_be_bytes());

        buf.clear();
        RowValues::Int(3).to_sql(&Type::INT2, &mut buf).unwrap();
        assert_eq!(buf.as_ref(), 3_i16.to_be_bytes());
    }

    #[test]
    fn out_of_range_integers_are_rejected() {
        let mut buf = bytes::BytesMut::new();
        let err = RowValues::Int(i64::MAX)
            .to_sql(&Type::INT4, &mut buf)
            .err()
            .unwrap();
        assert!(err.to_string().contains("out of range for int4"), "{err}");
        assert!(
            RowValues::Int(40_000)
                .to_sql(&Type::INT2, &mut buf)
                .is_err()
        );
    }

    #[test]
    fn integers_widen_for_float_columns() {
        let mut buf = bytes::BytesMut::new();
        RowValues::Int(4).to_sql(&Type::FLOAT8, &mut buf).unwrap();
        assert_eq!(buf.as_ref(), 4.0_f64.to_be_bytes());
    }
}
