//! Dataset Loader Module
//! Parses CSV and JSON student files into a Polars DataFrame.

use std::fmt;
use std::fs::File;
use std::path::Path;

use log::debug;
use polars::prelude::*;
use thiserror::Error;

/// Recoverable load failures; the display strings double as the user-facing
/// console messages.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Formato inválido! Use apenas arquivos .csv ou .json.")]
    UnsupportedFormat,
    #[error("Arquivo não encontrado. Verifique o caminho e tente novamente.")]
    FileNotFound,
    #[error("Erro ao ler o arquivo: {0}")]
    ReadError(#[from] PolarsError),
}

/// Accepted file formats, decided by extension before any parse is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
}

impl FileFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("csv") => Some(Self::Csv),
            Some("json") => Some(Self::Json),
            _ => None,
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Csv => "CSV",
            Self::Json => "JSON",
        })
    }
}

/// Loads tabular files with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Parse the file at `path` into a DataFrame. The extension is checked
    /// first; only `.csv` and `.json` reach the parser.
    pub fn load(path: &str) -> Result<(DataFrame, FileFormat), LoaderError> {
        let format =
            FileFormat::from_path(Path::new(path)).ok_or(LoaderError::UnsupportedFormat)?;

        if !Path::new(path).is_file() {
            return Err(LoaderError::FileNotFound);
        }

        debug!("carregando {path} como {format}");

        let df = match format {
            FileFormat::Csv => LazyCsvReader::new(path)
                .with_infer_schema_length(Some(10000))
                .finish()?
                .collect()?,
            FileFormat::Json => {
                let file = File::open(path).map_err(PolarsError::from)?;
                JsonReader::new(file).finish()?
            }
        };

        Ok((df, format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> String {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[rstest]
    fn csv_loads_with_exact_row_count() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "alunos.csv",
            "Age,Final_Score\n18,75.0\n22,88.5\n30,61.0\n",
        );

        let (df, format) = DataLoader::load(&path).unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(format, FileFormat::Csv);
    }

    #[rstest]
    fn json_records_load_like_csv() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "alunos.json",
            r#"[{"Age":18,"Final_Score":75.0},{"Age":22,"Final_Score":88.5}]"#,
        );

        let (df, format) = DataLoader::load(&path).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(format, FileFormat::Json);
        assert!(df.column("Age").is_ok());
    }

    #[rstest]
    #[case("alunos.txt")]
    #[case("alunos.parquet")]
    #[case("alunos")]
    fn unsupported_extension_never_parses(#[case] name: &str) {
        let dir = TempDir::new().unwrap();
        // Valid CSV content behind a rejected name: the parse must not run.
        let path = write_file(&dir, name, "Age\n18\n");

        let err = DataLoader::load(&path).unwrap_err();
        assert!(matches!(err, LoaderError::UnsupportedFormat));
    }

    #[rstest]
    fn missing_file_reports_not_found() {
        let err = DataLoader::load("/caminho/inexistente/alunos.csv").unwrap_err();
        assert!(matches!(err, LoaderError::FileNotFound));
    }

    #[rstest]
    fn malformed_json_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "quebrado.json", "isto não é json");

        let err = DataLoader::load(&path).unwrap_err();
        assert!(matches!(err, LoaderError::ReadError(_)));
    }
}
