//! 聚合流程
//!
//! 拆分输入 -> 并发查询 -> 按输入顺序累加合计

use chrono::Local;
use futures::stream::{self, StreamExt};
use log::{info, warn};
use uuid::Uuid;

use crate::error::AnalysisError;
use crate::lookup::lookup;
use crate::models::{Analysis, Totals};
use crate::usda::FoodCatalog;

/// 同时进行的查询上限
pub const MAX_CONCURRENT_LOOKUPS: usize = 4;

/// 按逗号拆分用户输入，去掉空白项
pub fn parse_food_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// 分析一组食物
///
/// 单个查询失败只会让该项被跳过（记录在 `missing`），
/// 全部失败时返回 `NoResults`，输入为空时不发起任何请求。
pub async fn analyze<C: FoodCatalog>(catalog: &C, input: &str) -> Result<Analysis, AnalysisError> {
    let queries = parse_food_list(input);
    if queries.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let run_id = Uuid::new_v4().to_string();
    info!(
        "event=analysis_start run_id={run_id} queries={}",
        queries.len()
    );

    // buffered 保持输入顺序；合计在全部完成后统一累加
    let outcomes: Vec<_> = stream::iter(queries.iter().map(|q| lookup(catalog, q)))
        .buffered(MAX_CONCURRENT_LOOKUPS)
        .collect()
        .await;

    let mut results = Vec::new();
    let mut totals = Totals::new();
    let mut missing = Vec::new();

    for (query, outcome) in queries.into_iter().zip(outcomes) {
        match outcome {
            Ok(record) => {
                info!(
                    "event=lookup_done run_id={run_id} query={query:?} status=found fields={}",
                    record.field_count()
                );
                totals.add(&record);
                results.push(record);
            }
            Err(e) => {
                warn!("event=lookup_done run_id={run_id} query={query:?} status=not_found cause={e}");
                missing.push(query);
            }
        }
    }

    if results.is_empty() {
        warn!("event=analysis_done run_id={run_id} status=no_results");
        return Err(AnalysisError::NoResults);
    }

    info!(
        "event=analysis_done run_id={run_id} status=ok found={} missing={}",
        results.len(),
        missing.len()
    );

    Ok(Analysis {
        run_id,
        analyzed_at: Local::now(),
        results,
        totals,
        missing,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::LookupError;
    use crate::usda::{SearchFood, SearchNutrient, SearchResponse};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 内存中的食物目录，未登记的查询返回空列表
    #[derive(Default)]
    pub(crate) struct FakeCatalog {
        foods: HashMap<String, (String, Vec<(String, f64)>)>,
        failing: HashMap<String, u16>,
        pub calls: AtomicUsize,
        in_flight: AtomicUsize,
        pub max_in_flight: AtomicUsize,
    }

    impl FakeCatalog {
        pub(crate) fn with_food(mut self, query: &str, description: &str, nutrients: &[(&str, f64)]) -> Self {
            self.foods.insert(
                query.to_string(),
                (
                    description.to_string(),
                    nutrients.iter().map(|(n, v)| (n.to_string(), *v)).collect(),
                ),
            );
            self
        }

        pub(crate) fn with_status(mut self, query: &str, status: u16) -> Self {
            self.failing.insert(query.to_string(), status);
            self
        }

        pub(crate) fn standard() -> Self {
            Self::default()
                .with_food(
                    "apple",
                    "Apples, raw, with skin",
                    &[
                        ("Energy", 52.0),
                        ("Protein", 0.3),
                        ("Total lipid (fat)", 0.2),
                        ("Carbohydrate, by difference", 14.0),
                    ],
                )
                .with_food(
                    "bread",
                    "Bread, whole-wheat",
                    &[
                        ("Energy", 252.0),
                        ("Protein", 12.5),
                        ("Total lipid (fat)", 3.5),
                        ("Carbohydrate, by difference", 43.0),
                        ("Sugars, total including NLEA", 4.4),
                        ("Fiber, total dietary", 6.0),
                    ],
                )
        }
    }

    impl FoodCatalog for FakeCatalog {
        async fn search(&self, query: &str, page_size: u32) -> Result<SearchResponse, LookupError> {
            assert_eq!(page_size, 1);
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            // 让出一次，使并发的查询真正重叠
            tokio::task::yield_now().await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if let Some(status) = self.failing.get(query) {
                return Err(LookupError::Status(*status));
            }
            let foods = self
                .foods
                .get(query)
                .map(|(description, nutrients)| {
                    vec![SearchFood {
                        description: Some(description.clone()),
                        food_nutrients: Some(
                            nutrients
                                .iter()
                                .map(|(name, value)| SearchNutrient {
                                    nutrient_name: Some(name.clone()),
                                    value: Some(*value),
                                })
                                .collect(),
                        ),
                    }]
                })
                .unwrap_or_default();
            Ok(SearchResponse { foods: Some(foods) })
        }
    }

    #[test]
    fn test_parse_food_list() {
        assert_eq!(
            parse_food_list(" apple, bread ,, paneer ,"),
            vec!["apple", "bread", "paneer"]
        );
        assert!(parse_food_list("  ").is_empty());
        assert!(parse_food_list(" , ,").is_empty());
    }

    #[tokio::test]
    async fn test_single_apple() {
        let catalog = FakeCatalog::standard();
        let analysis = analyze(&catalog, "apple").await.unwrap();

        assert_eq!(analysis.results.len(), 1);
        assert_eq!(analysis.results[0].description, "Apples, raw, with skin");
        let totals: Vec<_> = analysis.totals.iter().collect();
        assert_eq!(
            totals,
            vec![
                ("Calories (kcal)", 52.0),
                ("Protein (g)", 0.3),
                ("Fat (g)", 0.2),
                ("Carbohydrates (g)", 14.0),
                ("Sugars (g)", 0.0),
                ("Fiber (g)", 0.0),
            ]
        );
        assert!(analysis.missing.is_empty());
    }

    #[tokio::test]
    async fn test_partial_failure_is_skipped() {
        let catalog = FakeCatalog::standard();
        let analysis = analyze(&catalog, "apple, zzzznotafood").await.unwrap();

        assert_eq!(analysis.results.len(), 1);
        assert_eq!(analysis.totals.get("Calories (kcal)"), Some(52.0));
        assert_eq!(analysis.missing, vec!["zzzznotafood"]);
    }

    #[tokio::test]
    async fn test_http_errors_collapse_to_not_found() {
        let catalog = FakeCatalog::standard().with_status("steak", 429);
        let analysis = analyze(&catalog, "steak, bread").await.unwrap();
        assert_eq!(analysis.results.len(), 1);
        assert_eq!(analysis.missing, vec!["steak"]);
    }

    #[tokio::test]
    async fn test_all_failures() {
        let catalog = FakeCatalog::standard().with_status("zzzznotafood2", 500);
        let result = analyze(&catalog, "zzzznotafood1, zzzznotafood2").await;
        assert_eq!(result.unwrap_err(), AnalysisError::NoResults);
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_calls() {
        let catalog = FakeCatalog::standard();
        assert_eq!(
            analyze(&catalog, "   ").await.unwrap_err(),
            AnalysisError::EmptyInput
        );
        assert_eq!(analyze(&catalog, "").await.unwrap_err(), AnalysisError::EmptyInput);
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_sums_and_result_order() {
        let catalog = FakeCatalog::standard();
        let analysis = analyze(&catalog, "bread, apple, bread").await.unwrap();

        let descriptions: Vec<_> = analysis.results.iter().map(|r| r.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec!["Bread, whole-wheat", "Apples, raw, with skin", "Bread, whole-wheat"]
        );
        assert_eq!(analysis.totals.get("Calories (kcal)"), Some(556.0));
        assert_eq!(analysis.totals.get("Fiber (g)"), Some(12.0));
        assert_eq!(analysis.totals.get("Sugars (g)"), Some(8.8));
    }

    #[tokio::test]
    async fn test_totals_order_independent() {
        let catalog = FakeCatalog::standard();
        let a = analyze(&catalog, "apple, bread, nothing").await.unwrap();
        let b = analyze(&catalog, "nothing, bread, apple").await.unwrap();
        assert_eq!(a.totals, b.totals);
        assert_eq!(a.missing, b.missing);
    }

    #[tokio::test]
    async fn test_lookup_is_idempotent() {
        let catalog = FakeCatalog::standard();
        let first = lookup(&catalog, "bread").await.unwrap();
        let second = lookup(&catalog, "bread").await.unwrap();
        assert_eq!(first, second);
        assert!(matches!(
            lookup(&catalog, "nothing").await,
            Err(LookupError::NoMatch)
        ));
    }

    #[tokio::test]
    async fn test_concurrent_lookups_are_bounded() {
        let catalog = FakeCatalog::standard();
        let input = vec!["apple"; 10].join(", ");
        let analysis = analyze(&catalog, &input).await.unwrap();

        assert_eq!(analysis.results.len(), 10);
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 10);
        let peak = catalog.max_in_flight.load(Ordering::SeqCst);
        assert!(peak >= 1 && peak <= MAX_CONCURRENT_LOOKUPS, "peak {peak}");
    }
}
