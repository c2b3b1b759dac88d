use bitflags::bitflags;
use dom::NodeType;

bitflags! {
    /// Node-type mask with the bit values of the DOM `NodeFilter.SHOW_*`
    /// constants: bit `n - 1` stands for node type `n`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct WhatToShow: u32 {
        const ELEMENT = 0x1;
        const TEXT = 0x4;
        const COMMENT = 0x80;
        const DOCUMENT = 0x100;
        const ALL = 0xFFFF_FFFF;
    }
}

impl WhatToShow {
    pub fn shows(self, node_type: NodeType) -> bool {
        let bit = 1u32 << (node_type.code() - 1);
        self.bits() & bit != 0
    }
}

impl From<NodeType> for WhatToShow {
    fn from(node_type: NodeType) -> Self {
        WhatToShow::from_bits_retain(1u32 << (node_type.code() - 1))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WalkerConfig {
    /// Offer a node again when the walk passes its closing side (moving up
    /// from the last child, or turning around inside an empty element).
    pub revisit: bool,
    /// Nodes whose type is not in the mask are never yielded.
    pub what_to_show: WhatToShow,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            revisit: true,
            what_to_show: WhatToShow::ALL,
        }
    }
}
