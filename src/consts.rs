// Template names
pub const OPTION_TEMPLATE_NAME: &str = "剧情选项";
pub const COLLAPSE_TEMPLATE_NAME: &str = "折叠";
pub const COLOR_TEMPLATE_NAME: &str = "颜色";
pub const TABBER_TEMPLATE_NAME: &str = "tabber";

// Parameter markers inside the option template
pub const CHOICE_PARAMETER_MARKER: &str = "选项";
pub const PLOT_PARAMETER_MARKER: &str = "剧情";
pub const COLLAPSE_CONTENT_PARAMETER: &str = "内容";
pub const DESCRIPTION_MARKER: &str = "描述";

// Speaker attributed to lines without a `speaker: content` delimiter
pub const DEFAULT_SPEAKER: &str = "旅行者";

// Section that carries no dialogue and is skipped by the assembler
pub const TASK_SECTION_NAME: &str = "任务剧情";

// Nested template placeholders: `$$` guard around a 10 digit content hash
pub const PLACEHOLDER_GUARD: &str = "$$";
pub const PLACEHOLDER_ID_LENGTH: usize = 10;

// Templates that resolve to nothing without being an error
pub const IGNORED_TEMPLATE_NAMES: &[&str] = &[
    "任务",
    "面包屑",
    "JS",
    "左侧目录",
    "提示",
    "任务描述",
    "图标",
    "黑幕",
    "图片放大",
    "悬浮框",
];
