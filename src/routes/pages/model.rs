use std::collections::{BTreeMap, HashMap};

use crate::database::{User, UserSession};

/// 按最后活跃日期统计会话数，日期升序
pub fn sessions_per_day(sessions: &[UserSession]) -> Vec<(String, f64)> {
    let mut days = BTreeMap::new();
    for session in sessions {
        *days.entry(session.timestamp.date_naive()).or_insert(0.0) += 1.0;
    }
    days.into_iter()
        .map(|(day, count)| (day.format("%Y-%m-%d").to_string(), count))
        .collect()
}

/// 按用户统计会话数，按邮箱排序
pub fn sessions_per_user(sessions: &[UserSession], users: &[User]) -> Vec<(String, f64)> {
    let emails: HashMap<i64, &str> = users.iter().map(|u| (u.id, u.email.as_str())).collect();

    let mut counts = BTreeMap::new();
    for session in sessions {
        let label = emails
            .get(&session.user_id)
            .map(|e| e.to_string())
            .unwrap_or_else(|| format!("#{}", session.user_id));
        *counts.entry(label).or_insert(0.0) += 1.0;
    }
    counts.into_iter().collect()
}

/// 纵轴上限，取不小于最大值的 5 的倍数
pub fn axis_max(entries: &[(String, f64)]) -> i64 {
    let max = entries.iter().map(|(_, v)| *v).fold(0.0, f64::max);
    (((max / 5.0).ceil() as i64) * 5).max(5)
}
