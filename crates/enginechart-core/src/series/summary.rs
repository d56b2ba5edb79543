//! Peak power / torque summary lines

use crate::sample::{ModelContext, PerformanceSample};
use crate::unit_conversion::{kw_to_hp, kw_to_ps, nm_to_kgm};

/// `"<kW> KW (<PS> PS / <HP> HP) @ <rpm> rpm"`
pub fn format_max_power(sample: &PerformanceSample, ctx: &ModelContext) -> String {
    let kw = sample.power_kw(ctx);
    format!(
        "{:.1} KW ({:.1} PS / {:.1} HP) @ {:.0} rpm",
        kw,
        kw_to_ps(kw),
        kw_to_hp(kw),
        sample.rpm()
    )
}

/// `"<Nm> Nm (<kgm> Kgm) @ <rpm> rpm"`
pub fn format_max_torque(sample: &PerformanceSample, ctx: &ModelContext) -> String {
    let nm = sample.torque_nm(ctx);
    format!("{:.1} Nm ({:.1} Kgm) @ {:.0} rpm", nm, nm_to_kgm(nm), sample.rpm())
}
