use crate::models::ProductRecord;
use anyhow::{Context, Result};
use std::path::Path;

/// Plain CSV copy of the exported rows; an absent price is an empty cell.
pub fn write_csv(path: &Path, records: &[ProductRecord]) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Could not create {:?}", path))?;
    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("write row {:?}", record.name))?;
    }
    writer.flush()?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("produtos.csv");
        let records = vec![
            ProductRecord {
                name: "Produto A".into(),
                price: Some(19.9),
                units_sold: 1200,
                rating: 4.5,
                link: "https://shopee.com.br/a".into(),
                image_url: "https://img/a.jpg".into(),
            },
            ProductRecord {
                name: "Produto B".into(),
                price: None,
                units_sold: 0,
                rating: 0.0,
                link: String::new(),
                image_url: String::new(),
            },
        ];

        assert_eq!(write_csv(&path, &records).unwrap(), 2);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(
            headers,
            vec!["name", "price", "units_sold", "rating", "link", "image_url"]
        );

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(&rows[0][0], "Produto A");
        assert_eq!(&rows[0][2], "1200");
        assert_eq!(&rows[1][1], "");
    }
}
