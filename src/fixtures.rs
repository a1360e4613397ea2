#[cfg(test)]
pub mod test {
    use crate::caster::{BoolCaster, Caster, IntCaster, ListCaster};
    use crate::error::CastError;
    use crate::field::Field;
    use crate::group::Minicfg;
    use crate::provider::MapProvider;
    use crate::value::Value;

    pub fn provider(pairs: &[(&str, &str)]) -> MapProvider {
        MapProvider::from_pairs(pairs.iter().copied())
    }

    /// Upper-cases its input; rejects the literal `"invalid"`. Has no type name.
    pub struct UpperCaster;

    impl Caster for UpperCaster {
        fn cast(&self, raw: &str) -> Result<Value, CastError> {
            if raw == "invalid" {
                return Err(CastError::custom("Invalid value"));
            }
            Ok(Value::String(raw.to_uppercase()))
        }

        fn type_name(&self) -> Option<String> {
            None
        }
    }

    /// The `SERVICE` app: top-level flags, a `DATABASE` group and an
    /// `EXTERNAL_API` group.
    pub fn service_config() -> Minicfg {
        Minicfg::new()
            .name("SERVICE")
            .field(
                "DEBUG",
                Field::new()
                    .caster(BoolCaster)
                    .default(false)
                    .description("enable debug mode"),
            )
            .child("Database", database_config())
            .child(
                "ExternalApi",
                Minicfg::new()
                    .name("EXTERNAL_API")
                    .field("KEY", Field::new().description("external API key"))
                    .field(
                        "SCOPES",
                        Field::new()
                            .caster(ListCaster::new())
                            .default(vec!["read"]),
                    ),
            )
    }

    pub fn database_config() -> Minicfg {
        Minicfg::new()
            .name("DATABASE")
            .field(
                "HOST",
                Field::new()
                    .default("localhost")
                    .description("database host")
                    .attach_file_field(),
            )
            .field(
                "PORT",
                Field::new()
                    .caster(IntCaster)
                    .default(5432)
                    .description("database port"),
            )
    }

    #[test]
    fn service_config_populates_with_defaults() {
        let config = service_config()
            .populated_with(&provider(&[("SERVICE_EXTERNAL_API_KEY", "k")]))
            .unwrap();
        let values = config.values().unwrap();
        assert_eq!(values.lookup("Database.PORT"), Some(&Value::Integer(5432)));
        assert_eq!(values.lookup("ExternalApi.KEY"), Some(&Value::from("k")));
    }
}
