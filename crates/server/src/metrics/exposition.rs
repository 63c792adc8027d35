use std::sync::Arc;
use super::server_metrics::ServerMetrics;

pub fn render_prometheus(m: &Arc<ServerMetrics>) -> String {
    let mut out = String::with_capacity(512);

    write_counter(&mut out, "adboard_ad_requests_total", m.ad_requests_total());
    write_counter(&mut out, "adboard_rate_limited_total", m.rate_limited_total());
    write_counter(&mut out, "adboard_ads_created_total", m.ads_created_total());
    write_counter(&mut out, "adboard_ads_updated_total", m.ads_updated_total());
    write_counter(&mut out, "adboard_ads_deleted_total", m.ads_deleted_total());
    write_counter(&mut out, "adboard_views_total", m.views_total());
    write_counter(&mut out, "adboard_view_conflicts_total", m.view_conflicts_total());

    out
}

fn write_counter(out: &mut String, name: &str, val: u64) {
    use std::fmt::Write;
    let _ = writeln!(out, "# TYPE {name} counter");
    let _ = writeln!(out, "{name} {val}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prometheus_output() {
        let m = ServerMetrics::new();
        m.inc_ads_created();
        m.inc_views();
        let output = render_prometheus(&m);
        assert!(output.contains("# TYPE adboard_views_total counter"));
        assert!(output.contains("adboard_views_total 1"));
        assert!(output.contains("adboard_ads_created_total 1"));
        assert!(output.contains("adboard_rate_limited_total 0"));
    }
}
