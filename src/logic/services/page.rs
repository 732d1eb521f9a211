use crate::config::JsonApiOptions;
use crate::error::{JsonApiError, Result};
use crate::logic::services::QueryParameterService;
use crate::model::{PageQuery, QueryParameterKind};

const SIZE_KEY: &str = "page[size]";
const NUMBER_KEY: &str = "page[number]";

/// Parses `?page[size]=10&page[number]=2`.
pub struct PageService {
    default_size: Option<usize>,
    maximum_size: Option<usize>,
    maximum_number: Option<usize>,
    size: Option<usize>,
    number: Option<i64>,
}

impl PageService {
    pub fn new(options: &JsonApiOptions) -> Self {
        Self {
            default_size: options.default_page_size,
            maximum_size: options.maximum_page_size,
            maximum_number: options.maximum_page_number,
            size: None,
            number: None,
        }
    }

    fn parse_size(&self, key: &str, value: &str) -> Result<usize> {
        let size = value
            .parse::<usize>()
            .ok()
            .filter(|size| *size > 0)
            .ok_or_else(|| {
                JsonApiError::invalid_query(
                    key,
                    format!(
                        "Value '{}' in '{}' query parameter must be a positive integer.",
                        value, key
                    ),
                )
            })?;

        if let Some(maximum) = self.maximum_size {
            if size > maximum {
                return Err(JsonApiError::invalid_query(
                    key,
                    format!(
                        "Value '{}' in '{}' query parameter exceeds the maximum page size of {}.",
                        value, key, maximum
                    ),
                ));
            }
        }

        Ok(size)
    }

    fn parse_number(&self, key: &str, value: &str) -> Result<i64> {
        let number = value
            .parse::<i64>()
            .ok()
            .filter(|number| *number != 0)
            .ok_or_else(|| {
                JsonApiError::invalid_query(
                    key,
                    format!(
                        "Value '{}' in '{}' query parameter must be a non-zero integer.",
                        value, key
                    ),
                )
            })?;

        if let Some(maximum) = self.maximum_number {
            if number.unsigned_abs() > maximum as u64 {
                return Err(JsonApiError::invalid_query(
                    key,
                    format!(
                        "Value '{}' in '{}' query parameter exceeds the maximum page number of {}.",
                        value, key, maximum
                    ),
                ));
            }
        }

        Ok(number)
    }
}

impl QueryParameterService for PageService {
    type Output = PageQuery;

    fn kind(&self) -> QueryParameterKind {
        QueryParameterKind::Page
    }

    /// Requested page, falling back to the configured default size and page 1
    fn get(&self) -> PageQuery {
        PageQuery {
            size: self.size.or(self.default_size),
            number: self.number.unwrap_or(1),
        }
    }

    fn can_parse(&self, key: &str) -> bool {
        key == SIZE_KEY || key == NUMBER_KEY
    }

    fn parse(&mut self, key: &str, value: &str) -> Result<()> {
        if value.is_empty() {
            return Err(JsonApiError::empty_parameter(key, self.kind()));
        }

        match key {
            SIZE_KEY => self.size = Some(self.parse_size(key, value)?),
            NUMBER_KEY => self.number = Some(self.parse_number(key, value)?),
            _ => {
                return Err(JsonApiError::invalid_query(
                    key,
                    format!("Query parameter '{}' is not a known page parameter.", key),
                ))
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_never_parsed() {
        let service = PageService::new(&JsonApiOptions::default());
        assert_eq!(
            service.get(),
            PageQuery {
                size: Some(10),
                number: 1
            }
        );

        let options = JsonApiOptions {
            default_page_size: None,
            ..JsonApiOptions::default()
        };
        assert_eq!(PageService::new(&options).get(), PageQuery::default());
    }

    #[test]
    fn test_parse_size_and_number() {
        let mut service = PageService::new(&JsonApiOptions::default());
        assert!(service.can_parse("page[size]"));
        assert!(service.can_parse("page[number]"));
        assert!(!service.can_parse("page[offset]"));
        assert!(!service.can_parse("page"));

        service.parse("page[size]", "25").unwrap();
        service.parse("page[number]", "-1").unwrap();
        assert_eq!(
            service.get(),
            PageQuery {
                size: Some(25),
                number: -1
            }
        );
    }

    #[test]
    fn test_invalid_values() {
        let mut service = PageService::new(&JsonApiOptions::default());

        for value in ["0", "-3", "ten", "1.5"] {
            let err = service.parse("page[size]", value).unwrap_err();
            assert!(err.detail().contains("positive integer"), "value {:?}", value);
        }

        let err = service.parse("page[number]", "0").unwrap_err();
        assert!(err.detail().contains("non-zero integer"));

        let err = service.parse("page[size]", "").unwrap_err();
        assert!(err
            .to_string()
            .contains("Page parameter must not be empty if provided"));
    }

    #[test]
    fn test_maximums() {
        let options = JsonApiOptions {
            maximum_page_size: Some(50),
            maximum_page_number: Some(100),
            ..JsonApiOptions::default()
        };
        let mut service = PageService::new(&options);

        service.parse("page[size]", "50").unwrap();
        let err = service.parse("page[size]", "51").unwrap_err();
        assert!(err.detail().contains("maximum page size of 50"));

        service.parse("page[number]", "-100").unwrap();
        let err = service.parse("page[number]", "101").unwrap_err();
        assert!(err.detail().contains("maximum page number of 100"));

        assert_eq!(service.get().size, Some(50));
        assert_eq!(service.get().number, -100);
    }
}
