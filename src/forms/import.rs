//! Bulk client import from CSV.
//!
//! Expected headers: `nombre`, `telefono`, `direccion`, `dias`. Only `nombre`
//! is required; `dias` lists weekday names separated by `;` or `,`. Unknown
//! columns are ignored.

use std::io::Read;

use crate::domain::client::NewClient;
use crate::domain::types::{ClientName, VisitDay};
use crate::forms::FormError;

pub struct ClientImportForm<R> {
    pub csv: R,
}

impl<R: Read> ClientImportForm<R> {
    pub fn new(csv: R) -> Self {
        Self { csv }
    }

    /// Parses every row into a [`NewClient`], failing on the first bad row.
    pub fn parse(self) -> Result<Vec<NewClient>, FormError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(self.csv);

        let headers = reader.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').eq_ignore_ascii_case(name))
        };
        let name_col = column("nombre").ok_or_else(|| FormError::InvalidRow {
            row: 1,
            message: "missing `nombre` column".to_string(),
        })?;
        let phone_col = column("telefono");
        let address_col = column("direccion");
        let days_col = column("dias");

        let mut clients = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            // Header is row 1.
            let row = index + 2;
            let field = |col: Option<usize>| col.and_then(|c| record.get(c)).map(str::to_string);

            let name = ClientName::new(field(Some(name_col)).unwrap_or_default()).map_err(|_| {
                FormError::InvalidRow {
                    row,
                    message: "empty name".to_string(),
                }
            })?;

            let days = field(days_col)
                .unwrap_or_default()
                .split([';', ','])
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(|d| {
                    d.parse::<VisitDay>().map_err(|err| FormError::InvalidRow {
                        row,
                        message: err.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            clients.push(NewClient::new(
                name,
                field(phone_col),
                field(address_col),
                days,
            ));
        }

        Ok(clients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_with_optional_columns() {
        let data = "nombre,telefono,direccion,dias\n\
                    Tienda Rosy,555-1234,Centro,lunes;jueves\n\
                    Abarrotes Pepe,,,\"martes, sábado\"\n";

        let clients = ClientImportForm::new(data.as_bytes()).parse().unwrap();

        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].name.as_str(), "Tienda Rosy");
        assert_eq!(clients[0].phone.as_deref(), Some("555-1234"));
        assert_eq!(
            clients[0].visit_days,
            vec![VisitDay::Monday, VisitDay::Thursday]
        );
        assert_eq!(clients[1].phone, None);
        assert_eq!(
            clients[1].visit_days,
            vec![VisitDay::Tuesday, VisitDay::Saturday]
        );
    }

    #[test]
    fn only_name_column_is_required() {
        let clients = ClientImportForm::new("nombre\nUno\nDos\n".as_bytes())
            .parse()
            .unwrap();
        assert_eq!(clients.len(), 2);
        assert!(clients[1].visit_days.is_empty());
    }

    #[test]
    fn reports_row_of_invalid_day() {
        let data = "nombre,dias\nUno,lunes\nDos,feriado\n";
        let err = ClientImportForm::new(data.as_bytes()).parse().unwrap_err();
        assert!(matches!(err, FormError::InvalidRow { row: 3, .. }));
    }

    #[test]
    fn missing_name_column_is_rejected() {
        let err = ClientImportForm::new("telefono\n555\n".as_bytes())
            .parse()
            .unwrap_err();
        assert!(matches!(err, FormError::InvalidRow { row: 1, .. }));
    }
}
