use crate::view::escape;

/// 折线面积图脚本模板
pub const CHART_AREA: &str = r#"Chart.defaults.global.defaultFontFamily = '-apple-system,system-ui,BlinkMacSystemFont,"Segoe UI",Roboto,"Helvetica Neue",Arial,sans-serif';
Chart.defaults.global.defaultFontColor = '#292b2c';

var ctx = document.getElementById("[ID]");
new Chart(ctx, {
  type: 'line',
  data: {
    labels: [[LABELS]],
    datasets: [{
      label: "Sessions",
      lineTension: 0.3,
      backgroundColor: "rgba(2,117,216,0.2)",
      borderColor: "rgba(2,117,216,1)",
      pointRadius: 5,
      pointBackgroundColor: "rgba(2,117,216,1)",
      pointBorderColor: "rgba(255,255,255,0.8)",
      pointHoverRadius: 5,
      pointHoverBackgroundColor: "rgba(2,117,216,1)",
      pointHitRadius: 50,
      pointBorderWidth: 2,
      data: [[VALUES]],
    }],
  },
  options: {
    scales: {
      xAxes: [{
        time: { unit: 'date' },
        gridLines: { display: false },
        ticks: { maxTicksLimit: 7 }
      }],
      yAxes: [{
        ticks: { min: [MIN], max: [MAX], maxTicksLimit: 5 },
        gridLines: { color: "rgba(0, 0, 0, .125)" }
      }],
    },
    legend: { display: false }
  }
});
"#;

/// 饼图脚本模板
pub const CHART_PIE: &str = r#"Chart.defaults.global.defaultFontFamily = '-apple-system,system-ui,BlinkMacSystemFont,"Segoe UI",Roboto,"Helvetica Neue",Arial,sans-serif';
Chart.defaults.global.defaultFontColor = '#292b2c';

var ctx = document.getElementById("[ID]");
new Chart(ctx, {
  type: 'pie',
  data: {
    labels: [[LABELS]],
    datasets: [{
      data: [[VALUES]],
      backgroundColor: ['#007bff', '#dc3545', '#ffc107', '#28a745'],
    }],
  },
});
"#;

/// 图表卡片：画布和对应的脚本
pub trait Chart {
    fn title(&self) -> &str;
    fn id(&self) -> &str;
    fn icon(&self) -> &str;
    fn entries(&self) -> &[(String, f64)];

    /// 填好占位符的脚本内容
    fn script_source(&self) -> String;

    fn script(&self) -> String {
        format!(
            "<script type=\"text/javascript\">{}</script>",
            self.script_source()
        )
    }

    fn render(&self) -> String {
        format!(
            "<div class=\"card mb-4\">\
             <div class=\"card-header\"><i class=\"fas {icon}\"></i>{title}</div>\
             <div class=\"card-body\"><canvas id=\"{id}\" width=\"100%\" height=\"30\"></canvas></div>\
             </div>",
            icon = escape(self.icon()),
            title = escape(self.title()),
            id = escape(self.id()),
        )
    }
}

/// 标签按 JSON 字符串写入脚本，`<` 转义以免提前闭合 script 标签
fn labels(entries: &[(String, f64)]) -> String {
    entries
        .iter()
        .map(|(label, _)| {
            serde_json::to_string(label)
                .unwrap_or_else(|_| "\"\"".into())
                .replace('<', "\\u003c")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn values(entries: &[(String, f64)]) -> String {
    entries
        .iter()
        .map(|(_, value)| value.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn fill(template: &str, id: &str, entries: &[(String, f64)]) -> String {
    template
        .replace("[ID]", id)
        .replace("[LABELS]", &labels(entries))
        .replace("[VALUES]", &values(entries))
}

pub struct AreaChart {
    title: String,
    id: String,
    entries: Vec<(String, f64)>,
    min: i64,
    max: i64,
}

impl AreaChart {
    pub fn new(
        title: impl Into<String>,
        id: impl Into<String>,
        entries: Vec<(String, f64)>,
        min: i64,
        max: i64,
    ) -> Self {
        Self {
            title: title.into(),
            id: id.into(),
            entries,
            min,
            max,
        }
    }
}

impl Chart for AreaChart {
    fn title(&self) -> &str {
        &self.title
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn icon(&self) -> &str {
        "fa-chart-area mr-1"
    }

    fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    fn script_source(&self) -> String {
        fill(CHART_AREA, &self.id, &self.entries)
            .replace("[MIN]", &self.min.to_string())
            .replace("[MAX]", &self.max.to_string())
    }
}

pub struct PieChart {
    title: String,
    id: String,
    entries: Vec<(String, f64)>,
}

impl PieChart {
    pub fn new(title: impl Into<String>, id: impl Into<String>, entries: Vec<(String, f64)>) -> Self {
        Self {
            title: title.into(),
            id: id.into(),
            entries,
        }
    }
}

impl Chart for PieChart {
    fn title(&self) -> &str {
        &self.title
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn icon(&self) -> &str {
        "fa-chart-pie mr-1"
    }

    fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    fn script_source(&self) -> String {
        fill(CHART_PIE, &self.id, &self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> Vec<(String, f64)> {
        vec![
            ("2001".into(), 56.0),
            ("2000".into(), 105.0),
            ("2002".into(), 12.5),
        ]
    }

    #[test]
    fn area_chart_fills_every_placeholder() {
        let chart = AreaChart::new("Sessions", "areaChart", series(), 0, 150);
        let script = chart.script_source();

        assert!(script.contains("document.getElementById(\"areaChart\")"));
        assert!(script.contains("labels: [\"2001\", \"2000\", \"2002\"]"));
        assert!(script.contains("data: [56, 105, 12.5]"));
        assert!(script.contains("min: 0, max: 150"));
        for placeholder in ["[ID]", "[LABELS]", "[VALUES]", "[MIN]", "[MAX]"] {
            assert!(!script.contains(placeholder));
        }
    }

    #[test]
    fn pie_chart_labels_cannot_close_the_script() {
        let chart = PieChart::new("Users", "pie", vec![("</script>".into(), 1.0)]);
        let html = chart.script();

        assert_eq!(html.matches("</script>").count(), 1);
        assert!(html.contains("\\u003c/script>"));
    }

    #[test]
    fn render_draws_a_canvas_card() {
        let chart = PieChart::new("Users", "pie", series());
        let html = chart.render();

        assert!(html.contains("<canvas id=\"pie\""));
        assert!(html.contains("fa-chart-pie"));
        assert_eq!(chart.entries().len(), 3);
    }
}
