//! Interactive console application.
//! Load-retry loop, fixed summary, cleaning pass, then the main menu with
//! the statistics query loop and chart generation.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use log::{debug, warn};
use polars::prelude::*;

use crate::charts::ChartPlotter;
use crate::data::columns::{ATTENDANCE, GENDER, PARENT_EDUCATION};
use crate::data::{CleanReport, DataCleaner, DataLoader, LoaderError};
use crate::stats::{StatsCalculator, Summarizer};

pub struct ConsoleApp;

impl ConsoleApp {
    /// Run the whole interactive session. Returns when the user picks the
    /// exit option or stdin closes.
    pub fn run() -> Result<()> {
        println!("=== Análise de Dados de Estudantes ===");

        let stdin = io::stdin();
        let mut input = stdin.lock();

        let Some(df) = Self::load_loop(&mut input)? else {
            return Ok(());
        };

        Self::print_summary(&df);
        let mut df = Self::clean(df)?;

        loop {
            println!("\nMenu Principal:");
            println!("1. Consultar estatísticas");
            println!("2. Gerar gráficos");
            println!("3. Sair");

            let Some(choice) = prompt(&mut input, "Escolha uma opção: ")? else {
                break;
            };
            match choice.as_str() {
                "1" => Self::query_loop(&mut input, &df)?,
                "2" => Self::render_charts(&mut df),
                "3" => {
                    println!("Encerrando o programa...");
                    break;
                }
                _ => println!("Opção inválida. Tente novamente."),
            }
        }
        Ok(())
    }

    /// Prompt for a file path until a dataset parses. `None` means stdin
    /// closed before anything loaded.
    fn load_loop(input: &mut impl BufRead) -> Result<Option<DataFrame>> {
        loop {
            let Some(path) =
                prompt(input, "Digite o caminho completo do arquivo .csv ou .json: ")?
            else {
                return Ok(None);
            };

            match DataLoader::load(&path) {
                Ok((df, format)) => {
                    println!(
                        "Arquivo {format} carregado com sucesso! ({} registros)",
                        df.height()
                    );
                    return Ok(Some(df));
                }
                Err(err @ (LoaderError::UnsupportedFormat | LoaderError::FileNotFound)) => {
                    println!("{err}");
                }
                Err(err) => {
                    println!("{err}");
                    println!("Tente novamente.");
                }
            }
        }
    }

    fn print_summary(df: &DataFrame) {
        if df.height() == 0 {
            println!("Nenhum dado disponível para análise.");
            return;
        }

        let summary = Summarizer::summarize(df);

        println!("\n--- Resumo Estatístico dos Dados ---\n");
        println!("Quantidade total de registros: {}", summary.total_rows);

        match summary.gender {
            Some(g) => println!(
                "\nDistribuição por gênero:\n- Homens: {}\n- Mulheres: {}",
                g.male, g.female
            ),
            None => println!("\nAviso: Coluna '{GENDER}' não encontrada no dataset."),
        }
        match summary.missing_parent_education {
            Some(n) => println!("\nRegistros sem dados sobre educação dos pais: {n}"),
            None => println!("\nAviso: Coluna '{PARENT_EDUCATION}' não encontrada no dataset."),
        }
        match summary.mean_attendance {
            Some(mean) => println!("\nMédia de frequência: {mean:.1}%"),
            None => println!("\nAviso: Coluna '{ATTENDANCE}' não encontrada no dataset."),
        }
    }

    fn clean(df: DataFrame) -> Result<DataFrame> {
        if df.height() == 0 {
            println!("Nenhum dado para limpar.");
            return Ok(df);
        }

        println!("\n--- Iniciando limpeza dos dados ---");
        let (df, report) = DataCleaner::clean(df)?;
        Self::print_clean_report(&report);
        Ok(df)
    }

    fn print_clean_report(report: &CleanReport) {
        if let Some(dropped) = report.rows_dropped {
            println!("Removidos {dropped} registros sem educação dos pais");
        }
        if let Some(median) = report.fill_median {
            println!(
                "Valores nulos em Attendance preenchidos com mediana: {}",
                fmt_value(median)
            );
        }
        println!(
            "--- Limpeza concluída. Registros restantes: {} ---",
            report.rows_remaining
        );
    }

    /// List numeric columns and answer per-column statistics queries until
    /// the user types the exit keyword.
    fn query_loop(input: &mut impl BufRead, df: &DataFrame) -> Result<()> {
        if df.height() == 0 {
            println!("Nenhum dado disponível para consulta.");
            return Ok(());
        }

        let numeric = StatsCalculator::numeric_columns(df);
        if numeric.is_empty() {
            println!("Nenhuma coluna numérica disponível.");
            return Ok(());
        }

        println!("\nColunas numéricas disponíveis:");
        for (i, name) in numeric.iter().enumerate() {
            println!("{}. {}", i + 1, name);
        }

        loop {
            let Some(choice) = prompt(input, "\nDigite o número da coluna ou 'sair': ")? else {
                return Ok(());
            };
            if choice.eq_ignore_ascii_case("sair") {
                return Ok(());
            }

            let Ok(idx) = choice.parse::<i64>() else {
                println!("Entrada inválida. Use números ou 'sair'.");
                continue;
            };
            if idx < 1 || idx as usize > numeric.len() {
                println!("Número inválido. Tente novamente.");
                continue;
            }
            let name = &numeric[idx as usize - 1];

            let values = StatsCalculator::column_values(df, name)?;
            let stats = StatsCalculator::compute_descriptive_stats(&values);

            println!("\nEstatísticas de '{name}':");
            println!("- Média: {:.2}", stats.mean);
            println!("- Mediana: {:.2}", stats.median);
            println!("- Desvio Padrão: {:.2}", stats.std);

            // Mode line only when the modes do not cover every row.
            if stats.modes.len() < df.height() {
                let modes: Vec<String> = stats.modes.iter().map(|&v| fmt_value(v)).collect();
                println!("- Moda: {}", modes.join(", "));
            }
        }
    }

    fn render_charts(df: &mut DataFrame) {
        if df.height() == 0 {
            println!("Nenhum dado disponível para gráficos.");
            return;
        }

        if ChartPlotter::can_plot_sleep_vs_final(df) {
            let out = std::env::temp_dir().join("sono_vs_nota_final.png");
            match ChartPlotter::render_sleep_vs_final(df, &out) {
                Ok(()) => {
                    println!("Gráfico salvo em {}", out.display());
                    open_chart(&out);
                }
                Err(err) => println!("Erro ao gerar gráfico: {err}"),
            }
        } else {
            println!("\nDados insuficientes para gerar gráfico de Sono vs Nota.");
        }

        if ChartPlotter::can_plot_age_vs_midterm(df) {
            let out = std::env::temp_dir().join("media_notas_faixa_etaria.png");
            match ChartPlotter::render_age_vs_midterm(df, &out) {
                Ok(()) => {
                    println!("Gráfico salvo em {}", out.display());
                    open_chart(&out);
                }
                Err(err) => println!("Erro ao gerar gráfico: {err}"),
            }
        } else {
            println!("\nDados insuficientes para gerar gráfico de Idade vs Nota.");
        }
    }
}

fn open_chart(path: &std::path::Path) {
    if let Err(err) = open::that(path) {
        warn!("falha ao abrir o visualizador de imagens: {err}");
    }
}

/// Print a prompt and read one trimmed line. `None` signals end of input.
fn prompt(input: &mut impl BufRead, message: &str) -> Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        debug!("entrada encerrada (EOF)");
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Integer-valued numbers print without the trailing `.0`, matching the way
/// integer columns are displayed.
fn fmt_value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        v.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[rstest]
    #[case(84.5, "84.5")]
    #[case(90.0, "90")]
    #[case(-3.0, "-3")]
    #[case(2.25, "2.25")]
    fn fmt_value_trims_integer_floats(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(fmt_value(value), expected);
    }

    #[rstest]
    fn prompt_returns_none_at_eof() {
        let mut input = Cursor::new(b"".to_vec());
        assert_eq!(prompt(&mut input, "? ").unwrap(), None);
    }

    #[rstest]
    fn prompt_trims_the_line() {
        let mut input = Cursor::new(b"  resposta \n".to_vec());
        assert_eq!(prompt(&mut input, "? ").unwrap().as_deref(), Some("resposta"));
    }

    #[rstest]
    fn load_loop_retries_until_a_valid_file() {
        let dir = TempDir::new().unwrap();
        let csv = dir.path().join("alunos.csv");
        std::fs::write(&csv, "Age,Final_Score\n18,75.0\n22,88.5\n").unwrap();

        let script = format!(
            "nota.txt\n/nao/existe.csv\n{}\n",
            csv.to_string_lossy()
        );
        let mut input = Cursor::new(script.into_bytes());

        let df = ConsoleApp::load_loop(&mut input).unwrap().unwrap();
        assert_eq!(df.height(), 2);
    }

    #[rstest]
    fn load_loop_gives_up_at_eof() {
        let mut input = Cursor::new(b"caminho.txt\n".to_vec());
        assert!(ConsoleApp::load_loop(&mut input).unwrap().is_none());
    }
}
