//! USDA FoodData Central 搜索接口
//!
//! 线上数据结构、`FoodCatalog` 抽象以及基于 reqwest 的实现

use std::future::Future;

use log::debug;
use serde::{Deserialize, Deserializer};

use crate::config::Config;
use crate::error::LookupError;

/// 搜索响应，只保留用到的字段
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub foods: Option<Vec<SearchFood>>,
}

/// 候选食物
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchFood {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "foodNutrients")]
    pub food_nutrients: Option<Vec<SearchNutrient>>,
}

/// 候选食物上的营养素条目，类型不符的字段视为缺失
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchNutrient {
    #[serde(default, rename = "nutrientName", deserialize_with = "lenient_string")]
    pub nutrient_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub value: Option<f64>,
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_str().map(str::to_string)))
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()))
}

impl SearchResponse {
    /// 第一个候选，列表缺失或为空时返回 None
    pub fn first_food(self) -> Option<SearchFood> {
        self.foods.and_then(|foods| foods.into_iter().next())
    }
}

/// 远端食物目录
pub trait FoodCatalog {
    /// 搜索最多 `page_size` 个匹配项
    fn search(
        &self,
        query: &str,
        page_size: u32,
    ) -> impl Future<Output = Result<SearchResponse, LookupError>> + Send;
}

/// USDA API 客户端
#[derive(Clone)]
pub struct UsdaClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl UsdaClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("nutritrack/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

impl FoodCatalog for UsdaClient {
    async fn search(&self, query: &str, page_size: u32) -> Result<SearchResponse, LookupError> {
        let url = format!("{}/foods/search", self.base_url);
        let page_size = page_size.to_string();

        // query 参数由 reqwest 负责编码
        let response = self
            .http
            .get(&url)
            .query(&[
                ("query", query),
                ("pageSize", page_size.as_str()),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!("event=catalog_status query={query:?} status={}", status.as_u16());
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
