#[cfg(test)]
mod tests {
    use crate::parsing::catalog_csv::{
        dataframe_to_events, parse_catalog_csv, parse_catalog_csv_to_events, CATALOG_COLUMNS,
    };
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper to create a temp CSV file
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", content).unwrap();
        temp_file
    }

    #[test]
    fn test_parse_catalog_basic() {
        let csv_content = "726834.5,38.1,23.7,10.0,5.2\n726900.25,-33.0,-71.5,35.0,6.8\n";
        let temp_file = create_temp_csv(csv_content);

        let df = parse_catalog_csv(temp_file.path()).unwrap();
        assert_eq!(df.height(), 2);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, CATALOG_COLUMNS.to_vec());
    }

    #[test]
    fn test_parse_catalog_to_events() {
        let csv_content = "726834.5,38.1,23.7,10.0,5.2\n726900.25,-33.0,-71.5,35.0,6.8\n";
        let temp_file = create_temp_csv(csv_content);

        let events = parse_catalog_csv_to_events(temp_file.path()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].time(), 726_834.5);
        assert_eq!(events[0].epicenter().latitude(), 38.1);
        assert_eq!(events[1].epicenter().longitude(), -71.5);
        assert_eq!(events[1].depth_km(), 35.0);
        assert_eq!(events[1].magnitude(), 6.8);
    }

    #[test]
    fn test_integer_columns_are_cast() {
        // whole-number depths and times are inferred as integers by the reader
        let csv_content = "726834,10,20,33,5\n726835,11,21,10,6\n";
        let temp_file = create_temp_csv(csv_content);

        let events = parse_catalog_csv_to_events(temp_file.path()).unwrap();
        assert_eq!(events[0].time(), 726_834.0);
        assert_eq!(events[1].magnitude(), 6.0);
    }

    #[test]
    fn test_wrong_column_count() {
        let temp_file = create_temp_csv("726834.5,38.1,23.7,5.2\n");
        let err = parse_catalog_csv(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("columns"), "{}", err);
    }

    #[test]
    fn test_out_of_range_row_is_reported() {
        let csv_content = "726834.5,38.1,23.7,10.0,5.2\n726900.25,-133.0,-71.5,35.0,6.8\n";
        let temp_file = create_temp_csv(csv_content);

        let df = parse_catalog_csv(temp_file.path()).unwrap();
        let err = dataframe_to_events(&df).unwrap_err();
        assert!(format!("{:#}", err).contains("row 2"), "{:#}", err);
    }

    #[test]
    fn test_missing_file() {
        let result = parse_catalog_csv_to_events(std::path::Path::new("/no/such/catalog.csv"));
        assert!(result.is_err());
    }
}
