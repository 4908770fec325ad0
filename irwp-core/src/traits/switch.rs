//! Interlock switch trait

/// Trait for the physical enable switch
///
/// Implementations must report an unreadable input as open.
pub trait InterlockSwitch {
    /// Check if the interlock circuit is closed (engaged)
    ///
    /// Takes `&mut self` because GPIO reads require mutable access.
    fn is_closed(&mut self) -> bool;
}
