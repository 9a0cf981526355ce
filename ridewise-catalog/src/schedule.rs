/// Bookable start times, one per hour
pub const TIME_SLOTS: [&str; 12] = [
    "08:00 AM", "09:00 AM", "10:00 AM", "11:00 AM",
    "12:00 PM", "01:00 PM", "02:00 PM", "03:00 PM",
    "04:00 PM", "05:00 PM", "06:00 PM", "07:00 PM",
];

/// Canonical form of a slot label, if it is one of ours
pub fn find_slot(label: &str) -> Option<&'static str> {
    let wanted = label.trim();
    TIME_SLOTS
        .iter()
        .copied()
        .find(|slot| slot.eq_ignore_ascii_case(wanted))
}
