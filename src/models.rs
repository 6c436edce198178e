use chrono::{DateTime, Local};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::nutrients::{self, NUTRIENT_COUNT};

/// 单个食物的查询结果
#[derive(Debug, Clone, PartialEq)]
pub struct FoodRecord {
    pub description: String,
    values: [Option<f64>; NUTRIENT_COUNT], // 按字典位置存放，None 表示目录未返回
}

impl FoodRecord {
    pub fn new(description: String) -> Self {
        Self {
            description,
            values: [None; NUTRIENT_COUNT],
        }
    }

    /// 按字典位置写入，重复写入以后者为准
    pub fn set(&mut self, index: usize, value: f64) {
        self.values[index] = Some(value);
    }

    /// 按显示标签读取
    pub fn get(&self, label: &str) -> Option<f64> {
        nutrients::index_of_label(label).and_then(|i| self.values[i])
    }

    /// 已有的营养素字段，按字典顺序
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (nutrients::label_at(i), v)))
    }

    pub fn field_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

/// 序列化为扁平对象: {"Description": ..., "<label>": value}
impl Serialize for FoodRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1 + self.field_count()))?;
        map.serialize_entry("Description", &self.description)?;
        for (label, value) in self.fields() {
            map.serialize_entry(label, &value)?;
        }
        map.end()
    }
}

/// 营养素合计，键集合恒为六个显示标签
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Totals {
    values: [f64; NUTRIENT_COUNT],
}

impl Totals {
    pub fn new() -> Self {
        Self::default()
    }

    /// 累加一条记录，缺失字段不贡献
    pub fn add(&mut self, record: &FoodRecord) {
        for (i, value) in record.values.iter().enumerate() {
            if let Some(v) = value {
                self.values[i] += v;
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        nutrients::index_of_label(label).map(|i| self.values[i])
    }

    /// (标签, 合计)，按字典顺序，总是六项
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (nutrients::label_at(i), *v))
    }
}

impl Serialize for Totals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(NUTRIENT_COUNT))?;
        for (label, value) in self.iter() {
            map.serialize_entry(label, &value)?;
        }
        map.end()
    }
}

/// 一次分析的结果
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub run_id: String,
    pub analyzed_at: DateTime<Local>,
    pub results: Vec<FoodRecord>,
    pub totals: Totals,
    pub missing: Vec<String>, // 未能解析的查询，保持输入顺序
}
