//! 营养素字典
//!
//! 远端目录中的营养素名称 -> 界面显示标签，固定六项

/// 追踪的营养素数量
pub const NUTRIENT_COUNT: usize = 6;

/// (源营养素名称, 显示标签)，顺序即显示顺序
pub const NUTRIENT_KEYS: [(&str, &str); NUTRIENT_COUNT] = [
    ("Energy", "Calories (kcal)"),
    ("Protein", "Protein (g)"),
    ("Total lipid (fat)", "Fat (g)"),
    ("Carbohydrate, by difference", "Carbohydrates (g)"),
    ("Sugars, total including NLEA", "Sugars (g)"),
    ("Fiber, total dietary", "Fiber (g)"),
];

/// 热量标签，饼图中不参与占比
pub const CALORIES_LABEL: &str = "Calories (kcal)";

/// 按源名称查找字典位置（精确匹配，区分大小写）
pub fn index_of_source(name: &str) -> Option<usize> {
    NUTRIENT_KEYS.iter().position(|(source, _)| *source == name)
}

/// 按显示标签查找字典位置
pub fn index_of_label(label: &str) -> Option<usize> {
    NUTRIENT_KEYS.iter().position(|(_, l)| *l == label)
}

/// 第 `index` 项的显示标签
pub fn label_at(index: usize) -> &'static str {
    NUTRIENT_KEYS[index].1
}

/// 所有显示标签
pub fn labels() -> impl Iterator<Item = &'static str> {
    NUTRIENT_KEYS.iter().map(|(_, label)| *label)
}
