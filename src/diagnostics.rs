//! 診断メッセージの出力先
//!
//! 生成パスはトレース情報をここへ書き込むだけで、書き込みが制御フローに
//! 影響することはない。

use std::fmt;

/// メッセージの重要度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Logging,
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Logging => "logging",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// (重要度, テキスト) を受け取るシンク。書き込みは失敗しない。
pub trait MessageCollector {
    fn report(&mut self, severity: Severity, message: &str);
}

/// `log` クレートへ転送するコレクター
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMessageCollector;

impl MessageCollector for LogMessageCollector {
    fn report(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Logging => log::debug!("{}", message),
            Severity::Info => log::info!("{}", message),
            Severity::Warning => log::warn!("{}", message),
            Severity::Error => log::error!("{}", message),
        }
    }
}

/// メッセージをメモリに蓄積するコレクター
#[derive(Debug, Default, Clone)]
pub struct BufferedMessageCollector {
    messages: Vec<(Severity, String)>,
}

impl BufferedMessageCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[(Severity, String)] {
        &self.messages
    }

    /// 指定した重要度のメッセージ
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &str> {
        self.messages
            .iter()
            .filter(move |(s, _)| *s == severity)
            .map(|(_, m)| m.as_str())
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl MessageCollector for BufferedMessageCollector {
    fn report(&mut self, severity: Severity, message: &str) {
        self.messages.push((severity, message.to_string()));
    }
}

impl<C: MessageCollector + ?Sized> MessageCollector for &mut C {
    fn report(&mut self, severity: Severity, message: &str) {
        (**self).report(severity, message);
    }
}
