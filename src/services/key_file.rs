//! # 键值配置文件编解码
//!
//! 解析和生成 INI 风格的键值配置文件（与 GLib `GKeyFile` 格式兼容）：
//!
//! ```text
//! # 注释
//! [python-good-code]
//! command=flake8
//! generate-report=false
//! ```
//!
//! ## 保留策略
//! 保存设置时会先读回已有文件再覆写已知键，因此解析结果按原始行保存：
//! 注释、空行、无法识别的行、其他分组和未知键在写回时都原样保留，
//! 只有被 `set_*` 修改过的条目会重新生成。
//!
//! ## 值转义
//! 字符串值支持 `\s`（行首及行尾空格）、`\n`、`\t`、`\r`、`\\` 转义序列。

/// 文件中的一行
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    /// 分组头：`[name]`
    Group(String),
    /// 键值条目：`key=value`（value 为未转义前的原始文本）
    Entry { key: String, value: String },
    /// 注释、空行或无法识别的行，写回时原样输出
    Verbatim(String),
}

/// 键值配置文件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyFile {
    lines: Vec<Line>,
}

impl KeyFile {
    /// 创建空文件
    pub fn new() -> Self {
        Self::default()
    }

    /// 从文本解析
    ///
    /// 解析是宽松的：任何无法识别的行都作为原始文本保留，从不失败。
    pub fn parse(content: &str) -> Self {
        let lines = content
            .lines()
            .map(|raw| {
                let trimmed = raw.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    return Line::Verbatim(raw.to_string());
                }
                if let Some(name) = trimmed
                    .strip_prefix('[')
                    .and_then(|rest| rest.strip_suffix(']'))
                {
                    return Line::Group(name.trim().to_string());
                }
                match trimmed.split_once('=') {
                    Some((key, value)) if !key.trim().is_empty() => Line::Entry {
                        key: key.trim().to_string(),
                        value: value.trim().to_string(),
                    },
                    _ => Line::Verbatim(raw.to_string()),
                }
            })
            .collect();

        Self { lines }
    }

    /// 读取字符串值（已反转义）；分组或键不存在时返回 None
    ///
    /// 同一分组内重复出现的键以最后一次为准。
    pub fn get_string(&self, group: &str, key: &str) -> Option<String> {
        let mut current: Option<&str> = None;
        let mut found = None;

        for line in &self.lines {
            match line {
                Line::Group(name) => current = Some(name.as_str()),
                Line::Entry { key: k, value } if current == Some(group) && k == key => {
                    found = Some(value.as_str());
                }
                _ => {}
            }
        }

        found.map(unescape_value)
    }

    /// 读取布尔值：接受 `true`/`false`/`1`/`0`（不区分大小写）
    ///
    /// 键不存在或值无法识别时返回 None，由调用方决定默认值。
    pub fn get_bool(&self, group: &str, key: &str) -> Option<bool> {
        let value = self.get_string(group, key)?;
        match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }

    /// 读取无符号整数值；键不存在或值无法解析时返回 None
    pub fn get_u64(&self, group: &str, key: &str) -> Option<u64> {
        self.get_string(group, key)?.trim().parse().ok()
    }

    /// 写入字符串值（自动转义）
    ///
    /// - 键已存在：原地替换该条目（重复键全部替换）
    /// - 分组存在但键不存在：追加到该分组最后一个条目之后
    /// - 分组不存在：在文件末尾新建分组
    pub fn set_string(&mut self, group: &str, key: &str, value: &str) {
        let escaped = escape_value(value);

        let mut current: Option<String> = None;
        let mut replaced = false;
        // 分组内最后一个非空内容行的下标，新条目插在它后面
        let mut insert_at: Option<usize> = None;

        for (i, line) in self.lines.iter_mut().enumerate() {
            match line {
                Line::Group(name) => {
                    current = Some(name.clone());
                    if name == group {
                        insert_at = Some(i);
                    }
                }
                Line::Entry { key: k, value: v } if current.as_deref() == Some(group) => {
                    if k == key {
                        *v = escaped.clone();
                        replaced = true;
                    }
                    insert_at = Some(i);
                }
                Line::Verbatim(raw) if current.as_deref() == Some(group) => {
                    if !raw.trim().is_empty() {
                        insert_at = Some(i);
                    }
                }
                _ => {}
            }
        }

        if replaced {
            return;
        }

        let entry = Line::Entry {
            key: key.to_string(),
            value: escaped,
        };

        match insert_at {
            Some(i) => self.lines.insert(i + 1, entry),
            None => {
                if self
                    .lines
                    .last()
                    .is_some_and(|l| !matches!(l, Line::Verbatim(raw) if raw.trim().is_empty()))
                {
                    self.lines.push(Line::Verbatim(String::new()));
                }
                self.lines.push(Line::Group(group.to_string()));
                self.lines.push(entry);
            }
        }
    }

    /// 写入布尔值（`true` / `false`）
    pub fn set_bool(&mut self, group: &str, key: &str, value: bool) {
        self.set_string(group, key, if value { "true" } else { "false" });
    }

    /// 写入无符号整数值
    pub fn set_u64(&mut self, group: &str, key: &str, value: u64) {
        self.set_string(group, key, &value.to_string());
    }

    /// 生成文件文本，每行以 `\n` 结尾
    pub fn to_data(&self) -> String {
        let mut data = String::new();
        for line in &self.lines {
            match line {
                Line::Group(name) => {
                    data.push('[');
                    data.push_str(name);
                    data.push(']');
                }
                Line::Entry { key, value } => {
                    data.push_str(key);
                    data.push('=');
                    data.push_str(value);
                }
                Line::Verbatim(raw) => data.push_str(raw),
            }
            data.push('\n');
        }
        data
    }
}

/// 转义字符串值
fn escape_value(value: &str) -> String {
    // 解析时会去掉值两端的空白，行首空格和行尾的连续空格都需要转义
    let trailing_from = value.trim_end_matches(' ').len();

    let mut escaped = String::with_capacity(value.len());
    for (i, c) in value.char_indices() {
        match c {
            ' ' if i == 0 || i >= trailing_from => escaped.push_str("\\s"),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            '\\' => escaped.push_str("\\\\"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 反转义字符串值；无法识别的转义序列原样保留
fn unescape_value(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => unescaped.push(' '),
            Some('n') => unescaped.push('\n'),
            Some('t') => unescaped.push('\t'),
            Some('r') => unescaped.push('\r'),
            Some('\\') => unescaped.push('\\'),
            Some(other) => {
                unescaped.push('\\');
                unescaped.push(other);
            }
            None => unescaped.push('\\'),
        }
    }

    unescaped
}
