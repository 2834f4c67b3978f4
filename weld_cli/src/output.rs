//! Output formatting

use serde::Serialize;

use weld_core::activities::ItemEstimate;
use weld_core::errors::{CalcError, CalcResult};
use weld_core::project::{ProjectEstimate, ProjectMetadata};
use weld_core::units::{CuCm, CuMm, Meters, Millimeters};

const RULE: &str = "═══════════════════════════════════════════════════════════════════════════";

pub fn print_json<T: Serialize>(value: &T) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CalcError::serialization(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

pub fn print_project_table(meta: &ProjectMetadata, estimate: &ProjectEstimate) {
    println!("{}", RULE);
    println!("  WELD LABOR ESTIMATE");
    println!("{}", RULE);
    println!("  Job:       {}", meta.job_id);
    println!("  Client:    {}", meta.client);
    println!("  Estimator: {}", meta.estimator);
    println!();
    println!(
        "  {:<12} {:<22} {:>4} {:>7} {:>10} {:>10} {:>11}",
        "Item", "Type", "Qty", "Passes", "Weld h", "Manual h", "Total h"
    );
    println!("  {}", "-".repeat(RULE.chars().count() - 2));
    for line in &estimate.items {
        let item = &line.estimate;
        println!(
            "  {:<12} {:<22} {:>4} {:>7} {:>10.2} {:>10.2} {:>11.2}",
            item.label,
            item.weld_type.display_name(),
            item.quantity,
            item.total_passes(),
            item.total_weld_hours(),
            item.total_manual_hours(),
            item.total_hours,
        );
    }
    println!("  {}", "-".repeat(RULE.chars().count() - 2));
    println!(
        "  {:<12} {:<22} {:>4} {:>7} {:>10.2} {:>10.2} {:>11.2}",
        "TOTAL", "", "", estimate.total_passes, estimate.total_weld_hours, estimate.total_manual_hours, estimate.total_hours,
    );
    println!();

    if !estimate.hours_by_process.is_empty() {
        println!("  Weld hours by process:");
        for (process, hours) in &estimate.hours_by_process {
            println!("    {:<6} {:>10.2} h", process.code(), hours);
        }
        println!();
    }
    println!("  Deposited weld metal: {:.1} kg", estimate.total_mass_kg);
    println!("{}", RULE);
}

pub fn print_item_detail(item: &ItemEstimate) {
    let weld = &item.weld;
    println!();
    println!("{} ({}, {} mm, {})", item.label, weld.weld_type, weld.rates.thickness_mm, weld.geometry.profile.display_name());
    let length: Meters = Millimeters(weld.geometry.weld_length_mm).into();
    let volume: CuCm = CuMm(weld.volumes.total_mm3).into();
    println!(
        "  Length {:.3} m, speed bracket {}, factors {:.2}/{:.2}",
        length.value(),
        weld.rates.speed_bracket,
        weld.rates.operator_factor.inside,
        weld.rates.operator_factor.outside,
    );
    println!(
        "  Volume {:.1} cm³ ({:.2} kg), depths {:.1}/{:.1} mm",
        volume.value(), weld.volumes.deposited_mass_kg, weld.volumes.inside_depth_mm, weld.volumes.outside_depth_mm,
    );
    for zone in &weld.zones {
        println!(
            "  {:<8} {:>12.0} mm³ {:>4} passes {:>8.1} min {:>7.2} h  (×{:.2})",
            zone.zone.display_name(),
            zone.volume_mm3,
            zone.passes,
            zone.arc_time_min,
            zone.hours,
            zone.operator_factor,
        );
        for layer in &zone.layers {
            println!(
                "    {:<6} {:>5.1}% {:>12.0} mm³ {:>4} passes @ {:>5.0} mm/min {:>7.2} h",
                layer.process.code(),
                layer.percentage,
                layer.volume_mm3,
                layer.passes,
                layer.speed_mm_min,
                layer.hours,
            );
        }
    }
    if item.manual_hours_each > 0.0 {
        let a = &item.activities;
        println!(
            "  Manual: fit-up {:.2}, preheat {:.2}, grinding {:.2}, NDE {:.2}, other {:.2} h",
            a.fit_up_hours, a.preheat_hours, a.grinding_hours, a.nde_hours, a.other_hours,
        );
    }
    if !weld.fallbacks.is_empty() {
        let codes: Vec<&str> = weld.fallbacks.iter().map(|p| p.code()).collect();
        println!("  Fallback tables used for: {}", codes.join(", "));
    }
}
