/// Permission set a user holds on a shape.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Access {
    pub edit: bool,
    pub movement: bool,
    pub vision: bool,
}

impl Access {
    pub const NONE: Access = Access { edit: false, movement: false, vision: false };
    pub const VISION: Access = Access { edit: false, movement: false, vision: true };
    pub const FULL: Access = Access { edit: true, movement: true, vision: true };

    /// True when every permission in `need` is granted.
    #[inline]
    pub fn covers(self, need: Access) -> bool {
        (!need.edit || self.edit) && (!need.movement || self.movement) && (!need.vision || self.vision)
    }
}

/// A user with explicit access to a shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeOwner {
    pub user: String,
    pub access: Access,
}

impl ShapeOwner {
    pub fn new(user: impl Into<String>, access: Access) -> Self {
        Self { user: user.into(), access }
    }
}

/// The user the frame is rendered for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewer {
    pub name: String,
    /// Game masters own everything.
    pub is_dm: bool,
}

impl Viewer {
    pub fn player(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_dm: false }
    }

    pub fn dm(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_dm: true }
    }
}
