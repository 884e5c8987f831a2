//! Aggregate queries over the evaluation table.
//!
//! Every query is a pure read. Failures come back as `QueryError` and are
//! logged at debug level in the `query` domain.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{QueryError, QueryResult};
use crate::logging::{log, obj, v_str, Domain, Level};
use crate::stats::{self, Describe, HistogramBucket};
use crate::table::{Column, Table};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnMean {
    pub column: Column,
    pub mean: f64,
}

/// One partition of a `group_average`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRow {
    pub key: String,
    pub count: usize,
    pub means: Vec<ColumnMean>,
}

impl GroupRow {
    pub fn mean_of(&self, column: Column) -> Option<f64> {
        self.means
            .iter()
            .find(|m| m.column == column)
            .map(|m| m.mean)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<Column>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: Column, b: Column) -> Option<f64> {
        let i = self.columns.iter().position(|c| *c == a)?;
        let j = self.columns.iter().position(|c| *c == b)?;
        Some(self.values[i][j])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
    pub percentage: f64,
}

fn reject<T>(query: &str, err: QueryError) -> QueryResult<T> {
    log(
        Level::Debug,
        Domain::Query,
        "query_rejected",
        obj(&[("query", v_str(query)), ("msg", v_str(&err.to_string()))]),
    );
    Err(err)
}

fn numeric_values(table: &Table, query: &str, column: Column) -> QueryResult<Vec<f64>> {
    let values = match table.values(column) {
        Ok(values) => values,
        Err(err) => return reject(query, err),
    };
    if values.is_empty() {
        return reject(query, QueryError::EmptyPartition(format!("{} of {}", query, column)));
    }
    Ok(values)
}

impl Table {
    pub fn mean(&self, column: Column) -> QueryResult<f64> {
        let values = numeric_values(self, "mean", column)?;
        stats::mean(&values)
            .ok_or_else(|| QueryError::EmptyPartition(format!("mean of {}", column)))
    }

    pub fn describe(&self, column: Column) -> QueryResult<Describe> {
        let values = numeric_values(self, "describe", column)?;
        stats::describe(&values)
            .ok_or_else(|| QueryError::EmptyPartition(format!("describe of {}", column)))
    }

    pub fn histogram(
        &self,
        column: Column,
        bucket_count: usize,
    ) -> QueryResult<Vec<HistogramBucket>> {
        if bucket_count == 0 {
            return reject("histogram", QueryError::InvalidBucketCount);
        }
        let values = numeric_values(self, "histogram", column)?;
        stats::histogram(&values, bucket_count).ok_or(QueryError::InvalidBucketCount)
    }

    /// Mean of each value column per distinct `group_key` value, in
    /// first-appearance order of the key.
    pub fn group_average(
        &self,
        group_key: Column,
        value_columns: &[Column],
    ) -> QueryResult<Vec<GroupRow>> {
        if let Some(bad) = value_columns.iter().find(|c| !c.is_numeric()) {
            return reject("group_average", QueryError::NonNumericColumn(*bad));
        }
        if self.is_empty() {
            return reject(
                "group_average",
                QueryError::EmptyPartition(format!("group_average by {}", group_key)),
            );
        }

        let mut keys: Vec<String> = Vec::new();
        let mut sums: Vec<(usize, Vec<f64>)> = Vec::new();
        for record in self.records() {
            let key = record.label(group_key);
            let slot = match keys.iter().position(|k| *k == key) {
                Some(slot) => slot,
                None => {
                    keys.push(key);
                    sums.push((0, vec![0.0; value_columns.len()]));
                    keys.len() - 1
                }
            };
            let (count, totals) = &mut sums[slot];
            *count += 1;
            for (total, column) in totals.iter_mut().zip(value_columns) {
                *total += record.numeric(*column).unwrap_or_default();
            }
        }

        Ok(keys
            .into_iter()
            .zip(sums)
            .map(|(key, (count, totals))| GroupRow {
                key,
                count,
                means: value_columns
                    .iter()
                    .zip(totals)
                    .map(|(column, total)| ColumnMean {
                        column: *column,
                        mean: total / count as f64,
                    })
                    .collect(),
            })
            .collect())
    }

    /// Pearson coefficients for every pair of `columns`. Symmetric, unit diagonal.
    pub fn correlation_matrix(&self, columns: &[Column]) -> QueryResult<CorrelationMatrix> {
        let mut series = Vec::with_capacity(columns.len());
        for column in columns {
            series.push(numeric_values(self, "correlation_matrix", *column)?);
        }

        let n = columns.len();
        let mut values = vec![vec![1.0; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let r = match stats::pearson(&series[i], &series[j]) {
                    Some(r) => r,
                    None => {
                        let constant = if stats::pearson(&series[i], &series[i]).is_none() {
                            columns[i]
                        } else {
                            columns[j]
                        };
                        return reject("correlation_matrix", QueryError::ConstantColumn(constant));
                    }
                };
                values[i][j] = r;
                values[j][i] = r;
            }
        }
        // A single column still has to exist with non-zero variance.
        if n == 1 && stats::pearson(&series[0], &series[0]).is_none() {
            return reject("correlation_matrix", QueryError::ConstantColumn(columns[0]));
        }

        Ok(CorrelationMatrix {
            columns: columns.to_vec(),
            values,
        })
    }

    /// Count and share of each distinct value, most frequent first. Ties keep
    /// first-appearance order.
    pub fn value_counts(&self, column: Column) -> QueryResult<Vec<ValueCount>> {
        if self.is_empty() {
            return reject(
                "value_counts",
                QueryError::EmptyPartition(format!("value_counts of {}", column)),
            );
        }
        let mut counts: Vec<(String, usize)> = Vec::new();
        for record in self.records() {
            let value = record.label(column);
            match counts.iter().position(|(v, _)| *v == value) {
                Some(slot) => counts[slot].1 += 1,
                None => counts.push((value, 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        let total = self.len() as f64;
        Ok(counts
            .into_iter()
            .map(|(value, count)| ValueCount {
                value,
                count,
                percentage: count as f64 / total * 100.0,
            })
            .collect())
    }

    /// Share of rows, in percent, whose model T value equals the reference T value.
    pub fn exact_t_match_percentage(&self) -> QueryResult<f64> {
        if self.is_empty() {
            return reject(
                "exact_t_match_percentage",
                QueryError::EmptyPartition("exact T match".to_string()),
            );
        }
        let hits = self.records().iter().filter(|r| r.exact_t_match()).count();
        Ok(hits as f64 / self.len() as f64 * 100.0)
    }
}

/// The `n` rows with the highest (or lowest) `sort_column` mean.
///
/// The sort is stable, so equal values keep their input order.
pub fn top_n(
    rows: &[GroupRow],
    sort_column: Column,
    n: usize,
    descending: bool,
) -> QueryResult<Vec<GroupRow>> {
    let mut keyed = Vec::with_capacity(rows.len());
    for row in rows {
        match row.mean_of(sort_column) {
            Some(v) => keyed.push((v, row)),
            None => return reject("top_n", QueryError::NotAggregated(sort_column)),
        }
    }
    if descending {
        keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
    } else {
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    }
    log(
        Level::Trace,
        Domain::Query,
        "top_n",
        obj(&[("column", v_str(sort_column.as_str())), ("n", json!(n))]),
    );
    Ok(keyed.into_iter().take(n).map(|(_, row)| row.clone()).collect())
}
