//! Chart Plotter Module
//! Renders the two fixed study charts as PNG images with plotters.

use std::path::Path;

use anyhow::Result;
use log::info;
use plotters::prelude::*;
use polars::prelude::*;

use crate::data::columns::{AGE, FINAL_SCORE, MIDTERM_SCORE, SLEEP_HOURS};

/// Derived categorical column added to the dataset by the bar chart.
pub const AGE_BUCKET_COLUMN: &str = "Faixa Etária";

/// Fixed age ranges, in display order.
pub const AGE_BUCKETS: [&str; 4] = ["<18", "18-21", "22-24", "25+"];

const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);

pub struct ChartPlotter;

impl ChartPlotter {
    pub fn can_plot_sleep_vs_final(df: &DataFrame) -> bool {
        df.column(SLEEP_HOURS).is_ok() && df.column(FINAL_SCORE).is_ok()
    }

    pub fn can_plot_age_vs_midterm(df: &DataFrame) -> bool {
        df.column(AGE).is_ok() && df.column(MIDTERM_SCORE).is_ok()
    }

    /// Bucket label for an age value.
    pub fn age_bucket(age: f64) -> &'static str {
        if age < 18.0 {
            AGE_BUCKETS[0]
        } else if age <= 21.0 {
            AGE_BUCKETS[1]
        } else if age <= 24.0 {
            AGE_BUCKETS[2]
        } else {
            AGE_BUCKETS[3]
        }
    }

    /// Scatter plot of sleep hours against final score.
    pub fn render_sleep_vs_final(df: &DataFrame, out_path: &Path) -> Result<()> {
        let points = Self::paired_values(df, SLEEP_HOURS, FINAL_SCORE)?;
        let (x_min, x_max) = Self::axis_range(points.iter().map(|p| p.0));
        let (y_min, y_max) = Self::axis_range(points.iter().map(|p| p.1));

        let root = BitMapBackend::new(out_path, (1000, 600)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                "Relação entre Horas de Sono e Nota Final",
                ("sans-serif", 28),
            )
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        chart
            .configure_mesh()
            .x_desc("Horas de Sono por Noite")
            .y_desc("Nota Final")
            .draw()?;

        chart.draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, BLUE.mix(0.5).filled())),
        )?;

        root.present()?;
        info!("gráfico de dispersão gravado em {}", out_path.display());
        Ok(())
    }

    /// Bar chart of the mean midterm score per age bucket. Tags the dataset
    /// with the bucket column as a side effect.
    pub fn render_age_vs_midterm(df: &mut DataFrame, out_path: &Path) -> Result<()> {
        Self::add_age_buckets(df)?;
        let means = Self::bucket_means(df)?;

        let top = means
            .iter()
            .filter_map(|&(_, mean)| mean)
            .fold(0.0f64, f64::max);
        let y_max = if top > 0.0 { top * 1.15 } else { 1.0 };

        let root = BitMapBackend::new(out_path, (1000, 600)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Média de Notas por Faixa Etária", ("sans-serif", 28))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d((0i32..AGE_BUCKETS.len() as i32).into_segmented(), 0.0..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(AGE_BUCKETS.len())
            .x_label_formatter(&|seg| match seg {
                SegmentValue::CenterOf(i) if (0..AGE_BUCKETS.len() as i32).contains(i) => {
                    AGE_BUCKETS[*i as usize].to_string()
                }
                _ => String::new(),
            })
            .x_desc("Faixa Etária")
            .y_desc("Média da Nota")
            .draw()?;

        chart.draw_series(means.iter().enumerate().filter_map(|(i, &(_, mean))| {
            let mean = mean?;
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i as i32), 0.0),
                    (SegmentValue::Exact(i as i32 + 1), mean),
                ],
                SKY_BLUE.filled(),
            );
            bar.set_margin(0, 0, 12, 12);
            Some(bar)
        }))?;

        root.present()?;
        info!("gráfico de barras gravado em {}", out_path.display());
        Ok(())
    }

    /// Tag every row with its age bucket, in place. Null ages stay null.
    pub fn add_age_buckets(df: &mut DataFrame) -> Result<()> {
        let ages = df.column(AGE)?.cast(&DataType::Float64)?;
        let labels: Vec<Option<&str>> = ages
            .f64()?
            .into_iter()
            .map(|age| age.map(Self::age_bucket))
            .collect();
        df.with_column(Column::new(AGE_BUCKET_COLUMN.into(), labels))?;
        Ok(())
    }

    /// Mean midterm score per bucket, in `AGE_BUCKETS` order. Buckets with no
    /// scored rows yield `None`.
    pub fn bucket_means(df: &DataFrame) -> Result<Vec<(&'static str, Option<f64>)>> {
        let labels = df.column(AGE_BUCKET_COLUMN)?;
        let labels = labels.as_materialized_series().str()?;
        let scores = df.column(MIDTERM_SCORE)?.cast(&DataType::Float64)?;
        let scores = scores.f64()?;

        let mut sums = [0.0f64; 4];
        let mut counts = [0usize; 4];
        for (label, score) in labels.into_iter().zip(scores.into_iter()) {
            let (Some(label), Some(score)) = (label, score) else {
                continue;
            };
            if let Some(idx) = AGE_BUCKETS.iter().position(|b| *b == label) {
                sums[idx] += score;
                counts[idx] += 1;
            }
        }

        Ok(AGE_BUCKETS
            .iter()
            .enumerate()
            .map(|(i, bucket)| {
                let mean = (counts[i] > 0).then(|| sums[i] / counts[i] as f64);
                (*bucket, mean)
            })
            .collect())
    }

    fn paired_values(df: &DataFrame, x_col: &str, y_col: &str) -> Result<Vec<(f64, f64)>> {
        let xs = df.column(x_col)?.cast(&DataType::Float64)?;
        let ys = df.column(y_col)?.cast(&DataType::Float64)?;
        let xs = xs.f64()?;
        let ys = ys.f64()?;

        Ok(xs
            .into_iter()
            .zip(ys.into_iter())
            .filter_map(|(x, y)| Some((x?, y?)))
            .collect())
    }

    fn axis_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            if !v.is_nan() {
                min = min.min(v);
                max = max.max(v);
            }
        }
        if !min.is_finite() || !max.is_finite() {
            return (0.0, 1.0);
        }
        let pad = ((max - min) * 0.05).max(0.5);
        (min - pad, max + pad)
    }
}
