/*
    MartyPC
    https://github.com/dbalsom/martypc

    Copyright 2022-2025 Daniel Balsom

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------

    resources.rs

    Ownership tracking for singleton peripherals.

    LPT1, the primary IDE channel and the floppy controller base are not owned
    by any one chip. Whoever binds one must release it before it, or anyone
    else, binds it again. The registry keeps one slot per resource and refuses
    a second bind outright instead of silently replacing the first.

*/

use std::fmt;

use fxhash::FxHashMap;
use strum_macros::Display;

use crate::{device_types::peripheral::{FloppyConfig, IdeConfig}, error::ResourceError};

#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq)]
pub enum SingletonResource {
    #[strum(to_string = "LPT1")]
    Lpt1,
    #[strum(to_string = "Primary IDE channel")]
    IdePrimary,
    #[strum(to_string = "Floppy controller")]
    FloppyController,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SingletonBinding {
    Lpt1 { base: u16, irq: u8 },
    IdePrimary(IdeConfig),
    FloppyController(FloppyConfig),
}

impl SingletonBinding {
    pub fn resource(&self) -> SingletonResource {
        match self {
            SingletonBinding::Lpt1 { .. } => SingletonResource::Lpt1,
            SingletonBinding::IdePrimary(_) => SingletonResource::IdePrimary,
            SingletonBinding::FloppyController(_) => SingletonResource::FloppyController,
        }
    }
}

/// Identifies a component that may own singleton resources, usually one chip instance.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct OwnerId(pub u32);

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "owner #{}", self.0)
    }
}

#[derive(Copy, Clone, Debug)]
struct Slot {
    owner:   OwnerId,
    binding: SingletonBinding,
}

#[derive(Default)]
pub struct ResourceRegistry {
    next_owner: u32,
    owners: FxHashMap<OwnerId, &'static str>,
    slots: FxHashMap<SingletonResource, Slot>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_owner(&mut self, name: &'static str) -> OwnerId {
        let owner = OwnerId(self.next_owner);
        self.next_owner += 1;
        self.owners.insert(owner, name);
        owner
    }

    pub fn owner_name(&self, owner: OwnerId) -> &'static str {
        self.owners.get(&owner).copied().unwrap_or("unknown")
    }

    /// Bind a singleton resource to `owner`. Fails if the slot is occupied,
    /// including by `owner` itself.
    pub fn acquire(&mut self, owner: OwnerId, binding: SingletonBinding) -> Result<(), ResourceError> {
        let resource = binding.resource();
        if let Some(slot) = self.slots.get(&resource) {
            return Err(ResourceError::AlreadyBound {
                resource,
                owner: slot.owner,
            });
        }
        self.slots.insert(resource, Slot { owner, binding });
        Ok(())
    }

    /// Release a singleton resource held by `owner`.
    ///
    /// Releasing an unbound resource is not an error and returns `Ok(None)`.
    /// Releasing a resource bound by someone else is refused and leaves the
    /// binding untouched.
    pub fn release(
        &mut self,
        owner: OwnerId,
        resource: SingletonResource,
    ) -> Result<Option<SingletonBinding>, ResourceError> {
        match self.slots.get(&resource) {
            None => Ok(None),
            Some(slot) if slot.owner != owner => Err(ResourceError::NotOwner {
                resource,
                owner: slot.owner,
                requester: owner,
            }),
            Some(_) => Ok(self.slots.remove(&resource).map(|slot| slot.binding)),
        }
    }

    pub fn owner_of(&self, resource: SingletonResource) -> Option<OwnerId> {
        self.slots.get(&resource).map(|slot| slot.owner)
    }

    pub fn binding(&self, resource: SingletonResource) -> Option<SingletonBinding> {
        self.slots.get(&resource).map(|slot| slot.binding)
    }

    /// List the resources currently held by `owner`.
    pub fn held_by(&self, owner: OwnerId) -> Vec<SingletonResource> {
        let mut held: Vec<SingletonResource> = self
            .slots
            .iter()
            .filter(|(_, slot)| slot.owner == owner)
            .map(|(resource, _)| *resource)
            .collect();
        // Release order should not depend on hash order.
        held.sort_by_key(|r| *r as u8);
        held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LPT1_378: SingletonBinding = SingletonBinding::Lpt1 { base: 0x378, irq: 7 };

    #[test]
    fn second_acquire_without_release_is_refused() {
        let mut reg = ResourceRegistry::new();
        let a = reg.register_owner("a");
        let b = reg.register_owner("b");

        reg.acquire(a, LPT1_378).unwrap();
        assert_eq!(
            reg.acquire(b, SingletonBinding::Lpt1 { base: 0x278, irq: 7 }),
            Err(ResourceError::AlreadyBound {
                resource: SingletonResource::Lpt1,
                owner: a,
            })
        );
        // Re-acquiring your own binding is a violation too.
        assert!(reg.acquire(a, LPT1_378).is_err());
        assert_eq!(reg.binding(SingletonResource::Lpt1), Some(LPT1_378));
    }

    #[test]
    fn release_then_acquire() {
        let mut reg = ResourceRegistry::new();
        let a = reg.register_owner("a");
        let b = reg.register_owner("b");

        reg.acquire(a, LPT1_378).unwrap();
        assert_eq!(reg.release(a, SingletonResource::Lpt1), Ok(Some(LPT1_378)));
        assert_eq!(reg.owner_of(SingletonResource::Lpt1), None);
        reg.acquire(b, LPT1_378).unwrap();
        assert_eq!(reg.owner_of(SingletonResource::Lpt1), Some(b));
    }

    #[test]
    fn release_of_unbound_is_noop() {
        let mut reg = ResourceRegistry::new();
        let a = reg.register_owner("a");
        assert_eq!(reg.release(a, SingletonResource::IdePrimary), Ok(None));
        assert_eq!(reg.release(a, SingletonResource::IdePrimary), Ok(None));
    }

    #[test]
    fn release_by_non_owner_is_refused() {
        let mut reg = ResourceRegistry::new();
        let a = reg.register_owner("a");
        let b = reg.register_owner("b");

        reg.acquire(a, SingletonBinding::IdePrimary(IdeConfig::PRIMARY)).unwrap();
        assert!(matches!(
            reg.release(b, SingletonResource::IdePrimary),
            Err(ResourceError::NotOwner { .. })
        ));
        assert_eq!(reg.owner_of(SingletonResource::IdePrimary), Some(a));
    }

    #[test]
    fn held_by_lists_only_own_slots() {
        let mut reg = ResourceRegistry::new();
        let a = reg.register_owner("a");
        let b = reg.register_owner("b");

        reg.acquire(a, SingletonBinding::FloppyController(FloppyConfig::PRIMARY)).unwrap();
        reg.acquire(b, LPT1_378).unwrap();
        reg.acquire(a, SingletonBinding::IdePrimary(IdeConfig::PRIMARY)).unwrap();

        assert_eq!(
            reg.held_by(a),
            vec![SingletonResource::IdePrimary, SingletonResource::FloppyController]
        );
        assert_eq!(reg.held_by(b), vec![SingletonResource::Lpt1]);
        assert_eq!(reg.owner_name(b), "b");
    }
}
