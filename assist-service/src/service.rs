//! 助手服务模块
//!
//! 两块领域逻辑：
//! - 规则问答：按固定优先级匹配关键词，返回固定回答
//! - 数据库诊断：探测可选数据库句柄并生成状态报告

use async_trait::async_trait;

use common::models::DiagnosticReport;

use crate::state::DatabaseHandle;

/// 报告中最多列出的集合数量
const MAX_COLLECTIONS: usize = 10;

/// 报告中引用的错误信息最大字符数
const MAX_ERROR_CHARS: usize = 50;

/// 空问题时的提示语
const PROMPT_ANSWER: &str =
    "Please type a question about homework, exams, careers, or tools, and I'll help.";

/// 没有规则命中时的兜底回答
const FALLBACK_ANSWER: &str = "Here's a general approach: break the problem into smaller parts, define the knowns/unknowns, and draft a plan. If you share details (topic, constraints, goal), I can offer step-by-step guidance.";

/// 关键词规则表，顺序即优先级，命中第一条即返回
const ASSIST_RULES: &[(&[&str], &str)] = &[
    (
        &["gpa", "grade point", "cgpa"],
        "To estimate GPA: convert each grade to points (A=4, B=3, C=2, D=1, F=0), multiply by credits, sum, then divide by total credits. Use the GPA tool in the Tools page for a quick calculation.",
    ),
    (
        &["resume", "cv"],
        "Strong resumes highlight impact. Use bullet points with action verbs and numbers (e.g., 'Improved app performance by 30%'). Keep to 1 page if <10 years experience. Try the Resume Builder in Tools for a structured start.",
    ),
    (
        &["intern", "internship", "scholarship", "competition"],
        "Browse the Opportunities page for curated internships, scholarships, and competitions. Filter by region and deadline, then follow the official links to learn more.",
    ),
    (
        &["career", "path", "job role", "guidance"],
        "Think in 3 steps: explore roles (software, data, product, design), build a portfolio of 2–3 projects, and network (alumni, events). See the Career Guidance page for tracks and resources.",
    ),
    (
        &["study", "exam", "prepare", "revision"],
        "Use spaced repetition and active recall. Break sessions into 50-minute focus blocks with 10-minute breaks. Make concise cheat sheets and a weekly timetable from the Tools page.",
    ),
];

/// 规则问答服务
pub struct AssistService;

impl AssistService {
    /// 回答问题：小写并去除首尾空白后按优先级匹配规则
    ///
    /// 匹配是子串级别的，所以 "interview" 也会命中 "intern" 所在的
    /// 规则组；组间顺序保证高优先级先出。
    pub fn answer(question: &str) -> &'static str {
        let q = question.trim().to_lowercase();
        if q.is_empty() {
            return PROMPT_ANSWER;
        }

        ASSIST_RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| q.contains(k)))
            .map_or(FALLBACK_ANSWER, |(_, answer)| *answer)
    }
}

/// 可选数据库能力：枚举集合名
#[async_trait]
pub trait CollectionLister: Send + Sync {
    /// 枚举集合名，顺序由底层数据源决定
    async fn collection_names(&self) -> anyhow::Result<Vec<String>>;
}

#[async_trait]
impl CollectionLister for mongodb::Database {
    async fn collection_names(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.list_collection_names().await?)
    }
}

/// 数据库诊断服务
pub struct DiagnosticsService;

impl DiagnosticsService {
    /// 生成诊断报告
    ///
    /// 任何失败都只体现为报告中的描述性文字，本操作不会返回错误。
    pub async fn report(
        handle: &DatabaseHandle,
        database_url_set: bool,
        database_name_set: bool,
    ) -> DiagnosticReport {
        let mut report = DiagnosticReport::unavailable();

        match handle {
            DatabaseHandle::Absent => {
                report.database =
                    "❌ Database module not found (set DATABASE_URL to enable it)".to_string();
            }
            DatabaseHandle::Uninitialized => {
                report.database = "⚠️  Available but not initialized".to_string();
            }
            DatabaseHandle::Ready(db) => {
                report.connection_status = "Connected".to_string();
                Self::probe_collections(db, &mut report).await;
            }
        }

        // 环境变量只报告是否设置，与句柄状态无关
        report.database_url = env_presence(database_url_set);
        report.database_name = env_presence(database_name_set);

        report
    }

    /// 枚举集合名验证连通性；失败时只引用错误信息的前 50 个字符
    async fn probe_collections(lister: &dyn CollectionLister, report: &mut DiagnosticReport) {
        match lister.collection_names().await {
            Ok(mut names) => {
                names.truncate(MAX_COLLECTIONS);
                report.collections = names;
                report.database = "✅ Connected & Working".to_string();
            }
            Err(e) => {
                report.database = format!(
                    "⚠️  Connected but Error: {}",
                    truncate_chars(&e.to_string(), MAX_ERROR_CHARS)
                );
            }
        }
    }
}

fn env_presence(set: bool) -> String {
    if set { "✅ Set" } else { "❌ Not Set" }.to_string()
}

/// 按字符截断，避免落在多字节边界上
fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
