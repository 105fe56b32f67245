use sha256_check_core::config::ServiceConfig;
use sha256_check_core::{HostProfile, IdRule};
use std::fmt::Write;

pub fn run_profiles(cfg: &ServiceConfig) {
    print!("{}", describe(&cfg.profiles));
}

fn rule_name(rule: IdRule) -> &'static str {
    match rule {
        IdRule::Any => "any",
        IdRule::SinglePathComponent => "single-component",
        IdRule::Numeric => "numeric",
    }
}

pub(crate) fn describe(profiles: &[HostProfile]) -> String {
    let mut out = String::new();
    for p in profiles {
        let _ = writeln!(out, "{}  {}", p.name, p.home.display());
        for file in &p.allowed {
            let dir = p.subdir_for(file).unwrap_or("<unmapped>");
            let _ = writeln!(out, "  GET {}?file={}  -> {}", p.route(), file, dir);
        }
        if let (Some(route), Some(c)) = (p.container_route(), &p.containers) {
            let _ = writeln!(out, "  GET {}?id=<id>  (ids: {})", route, rule_name(c.ids));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha256_check_core::profile::builtin_profiles;

    #[test]
    fn describes_builtin_routes() {
        let text = describe(&builtin_profiles());
        assert!(text.contains("gateway  /home/gateway\n"));
        assert!(text.contains("  GET /gateway?file=relayd.conf  -> relayd\n"));
        assert!(text.contains("  GET /proxmox-dell/lxc?id=<id>  (ids: any)\n"));
        assert!(!text.contains("/gateway/lxc"));
    }

    #[test]
    fn marks_unmapped_files() {
        let mut p = HostProfile::new("gw", "/srv/gw", &[("pf.conf", "pf")]);
        p.allowed.push("relayd.conf".to_string());
        let text = describe(&[p]);
        assert!(text.contains("?file=relayd.conf  -> <unmapped>"));
    }
}
