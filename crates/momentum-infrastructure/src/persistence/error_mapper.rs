use momentum_domain::shared::DomainError;

/// Translates sqlx and serde_json failures into [`DomainError`]s.
pub struct RepositoryErrorMapper;

impl RepositoryErrorMapper {
    pub fn map_sqlx_error(err: sqlx::Error, context: &str) -> DomainError {
        match &err {
            sqlx::Error::RowNotFound => DomainError::NotFound(context.to_string()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DomainError::Conflict(format!("{}: {}", context, db_err.message()))
            }
            sqlx::Error::Database(db_err)
                if db_err.is_foreign_key_violation() || db_err.is_check_violation() =>
            {
                DomainError::ConstraintViolation(format!("{}: {}", context, db_err.message()))
            }
            sqlx::Error::PoolTimedOut => DomainError::Timeout(format!("{}: pool timed out", context)),
            _ => DomainError::Repository(format!("{}: {}", context, err)),
        }
    }

    pub fn map_json_error(err: serde_json::Error, context: &str) -> DomainError {
        DomainError::Serialization(format!("{}: {}", context, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err = RepositoryErrorMapper::map_sqlx_error(sqlx::Error::RowNotFound, "Find habit");
        assert!(matches!(err, DomainError::NotFound(ref m) if m == "Find habit"));
    }

    #[test]
    fn test_pool_timeout_is_recoverable() {
        let err = RepositoryErrorMapper::map_sqlx_error(sqlx::Error::PoolTimedOut, "Save");
        assert!(matches!(err, DomainError::Timeout(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_json_error() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = RepositoryErrorMapper::map_json_error(json_err, "Encode schedule");
        assert!(matches!(err, DomainError::Serialization(ref m) if m.starts_with("Encode schedule")));
    }
}
