//! 营养查询
//!
//! 单个食物名 -> 目录中最匹配的一条记录 -> 固定六项营养素

use log::debug;

use crate::error::LookupError;
use crate::models::FoodRecord;
use crate::nutrients;
use crate::usda::{FoodCatalog, SearchResponse};

/// 每次只请求一个匹配
const PAGE_SIZE: u32 = 1;

/// 查询单个食物
pub async fn lookup<C: FoodCatalog>(catalog: &C, food_name: &str) -> Result<FoodRecord, LookupError> {
    let response = catalog.search(food_name, PAGE_SIZE).await?;
    record_from_response(food_name, response).ok_or(LookupError::NoMatch)
}

/// 从搜索响应构建记录，没有候选时返回 None
pub fn record_from_response(food_name: &str, response: SearchResponse) -> Option<FoodRecord> {
    let food = response.first_food()?;

    let description = food
        .description
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| title_case(food_name));
    let mut record = FoodRecord::new(description);

    for nutrient in food.food_nutrients.unwrap_or_default() {
        let (Some(name), Some(value)) = (nutrient.nutrient_name, nutrient.value) else {
            continue;
        };
        match nutrients::index_of_source(&name) {
            Some(index) => record.set(index, value),
            None => debug!("event=nutrient_ignored food={food_name:?} nutrient={name:?}"),
        }
    }

    Some(record)
}

/// 每个单词首字母大写，其余小写
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usda::{SearchFood, SearchNutrient};

    fn nutrient(name: &str, value: f64) -> SearchNutrient {
        SearchNutrient {
            nutrient_name: Some(name.to_string()),
            value: Some(value),
        }
    }

    fn response(description: Option<&str>, nutrients: Vec<SearchNutrient>) -> SearchResponse {
        SearchResponse {
            foods: Some(vec![SearchFood {
                description: description.map(str::to_string),
                food_nutrients: Some(nutrients),
            }]),
        }
    }

    #[test]
    fn test_apple_record() {
        let resp = response(
            Some("Apples, raw, with skin"),
            vec![
                nutrient("Energy", 52.0),
                nutrient("Protein", 0.3),
                nutrient("Total lipid (fat)", 0.2),
                nutrient("Carbohydrate, by difference", 14.0),
                nutrient("Vitamin C, total ascorbic acid", 4.6),
            ],
        );
        let record = record_from_response("apple", resp).unwrap();
        assert_eq!(record.description, "Apples, raw, with skin");
        assert_eq!(record.field_count(), 4);
        assert_eq!(record.get("Calories (kcal)"), Some(52.0));
        assert_eq!(record.get("Protein (g)"), Some(0.3));
        assert_eq!(record.get("Fat (g)"), Some(0.2));
        assert_eq!(record.get("Carbohydrates (g)"), Some(14.0));
        assert_eq!(record.get("Sugars (g)"), None);
    }

    #[test]
    fn test_description_falls_back_to_title_case() {
        let record = record_from_response("greek yOGURT", response(None, vec![])).unwrap();
        assert_eq!(record.description, "Greek Yogurt");

        let record = record_from_response("paneer", response(Some("  "), vec![])).unwrap();
        assert_eq!(record.description, "Paneer");
    }

    #[test]
    fn test_duplicate_nutrient_last_write_wins() {
        let resp = response(
            Some("Bread"),
            vec![nutrient("Protein", 8.0), nutrient("Protein", 9.5)],
        );
        let record = record_from_response("bread", resp).unwrap();
        assert_eq!(record.get("Protein (g)"), Some(9.5));
    }

    #[test]
    fn test_incomplete_nutrient_entries_skipped() {
        let resp = response(
            Some("Rice"),
            vec![
                SearchNutrient {
                    nutrient_name: Some("Energy".to_string()),
                    value: None,
                },
                SearchNutrient {
                    nutrient_name: None,
                    value: Some(3.0),
                },
                nutrient("Fiber, total dietary", 0.4),
            ],
        );
        let record = record_from_response("rice", resp).unwrap();
        assert_eq!(record.field_count(), 1);
        assert_eq!(record.get("Fiber (g)"), Some(0.4));
    }

    #[test]
    fn test_empty_or_missing_foods() {
        assert!(record_from_response("apple", SearchResponse::default()).is_none());
        let empty = SearchResponse {
            foods: Some(Vec::new()),
        };
        assert!(record_from_response("apple", empty).is_none());
    }

    #[test]
    fn test_first_candidate_is_used() {
        let resp = SearchResponse {
            foods: Some(vec![
                SearchFood {
                    description: Some("First".to_string()),
                    food_nutrients: None,
                },
                SearchFood {
                    description: Some("Second".to_string()),
                    food_nutrients: None,
                },
            ]),
        };
        assert_eq!(record_from_response("x", resp).unwrap().description, "First");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("peanut butter"), "Peanut Butter");
        assert_eq!(title_case("o'brien 2go"), "O'Brien 2Go");
    }
}
