use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use referral_model::NetworkMember;

use crate::error::{ForestError, Result};
use crate::forest::{Forest, NodePath};
use crate::node::TreeNode;

/// Build slot: one per input member, linked by arena index during the build.
struct Slot {
    member: NetworkMember,
    children: Vec<usize>,
    parent: Option<usize>,
    root: bool,
    alive: bool,
}

impl Slot {
    fn new(member: NetworkMember) -> Self {
        Self {
            member,
            children: Vec::new(),
            parent: None,
            root: false,
            alive: true,
        }
    }
}

/// Build the sponsorship forest from normalized members.
///
/// Total: duplicate codes keep the later record (the earlier one is dropped
/// with a warning), unresolvable sponsors become orphan roots, and sponsor
/// cycles are broken by promoting the smallest-code member of each loop to an
/// orphan root. Every surviving member is reachable from exactly one root.
pub fn build_forest(members: Vec<NetworkMember>) -> Forest {
    let (forest, _broken) = build_inner(members);
    forest
}

/// Like [`build_forest`], but fail instead of silently breaking sponsor
/// cycles. Intended for callers that treat cyclic input as corrupt data.
pub fn build_forest_strict(members: Vec<NetworkMember>) -> Result<Forest> {
    let (forest, broken) = build_inner(members);
    match broken.into_iter().next() {
        Some(code) => Err(ForestError::SponsorCycle(code)),
        None => Ok(forest),
    }
}

fn build_inner(members: Vec<NetworkMember>) -> (Forest, Vec<String>) {
    let mut slots: Vec<Slot> = members.into_iter().map(Slot::new).collect();

    // Index pass: code -> slot. Later records overwrite earlier ones;
    // members with an empty code can never be a parent and stay unindexed.
    let mut index: HashMap<String, usize> = HashMap::new();
    for i in 0..slots.len() {
        let code = slots[i].member.code.clone();
        if code.is_empty() {
            continue;
        }
        if let Some(prev) = index.insert(code.clone(), i) {
            log::warn!("duplicate member code {code:?}; keeping the later record");
            slots[prev].alive = false;
        }
    }

    // Link pass: resolve each sponsor reference.
    for i in 0..slots.len() {
        if !slots[i].alive {
            continue;
        }
        match slots[i].member.sponsor_code.clone() {
            None => slots[i].root = true,
            Some(sponsor) => match index.get(&sponsor) {
                Some(&parent) if parent != i => {
                    slots[i].parent = Some(parent);
                    slots[parent].children.push(i);
                }
                Some(_) => {
                    log::warn!(
                        "member {:?} sponsors itself; treating as orphan",
                        slots[i].member.code
                    );
                    slots[i].member.is_orphaned = true;
                    slots[i].root = true;
                }
                None => {
                    log::debug!(
                        "sponsor {sponsor:?} of member {:?} not found; promoting to orphan root",
                        slots[i].member.code
                    );
                    slots[i].member.is_orphaned = true;
                    slots[i].root = true;
                }
            },
        }
    }

    let broken = break_cycles(&mut slots);

    // Sibling sort, including the root level, so a shuffled input collection
    // reproduces an identical forest.
    for i in 0..slots.len() {
        let mut kids = std::mem::take(&mut slots[i].children);
        kids.sort_by(|&a, &b| sibling_order(&slots[a].member, &slots[b].member));
        slots[i].children = kids;
    }
    let mut root_slots: Vec<usize> = (0..slots.len())
        .filter(|&i| slots[i].alive && slots[i].root)
        .collect();
    root_slots.sort_by(|&a, &b| sibling_order(&slots[a].member, &slots[b].member));

    let roots: Vec<TreeNode> = root_slots
        .into_iter()
        .map(|idx| assemble(&mut slots, idx))
        .collect();

    // Index the assembled tree: code -> child-index path from a root.
    let mut paths: HashMap<String, NodePath> = HashMap::new();
    let mut member_count = 0usize;
    let mut orphan_count = 0usize;
    for (r, root) in roots.iter().enumerate() {
        let mut path = vec![r];
        index_walk(root, &mut path, &mut paths, &mut member_count, &mut orphan_count);
    }

    log::info!(
        "built referral forest: {} roots, {} members, {} orphans",
        roots.len(),
        member_count,
        orphan_count
    );

    (Forest::from_parts(roots, paths, member_count), broken)
}

/// Total sibling order: `(order, name, code)` ascending. The code tie-break
/// keeps the ordering independent of input order.
fn sibling_order(a: &NetworkMember, b: &NetworkMember) -> Ordering {
    a.sponsor_order
        .cmp(&b.sponsor_order)
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.code.cmp(&b.code))
}

/// After linking, any live slot unreachable from the roots sits on (or hangs
/// off) a sponsor cycle. Per loop, detach the smallest-code member that is on
/// the cycle itself from its parent and promote it to an orphan root, which
/// makes the whole cluster reachable again.
fn break_cycles(slots: &mut [Slot]) -> Vec<String> {
    let mut reachable = vec![false; slots.len()];
    let starts: Vec<usize> = (0..slots.len())
        .filter(|&i| slots[i].alive && slots[i].root)
        .collect();
    mark_reachable(slots, &mut reachable, &starts);

    let mut broken = Vec::new();
    loop {
        let mut entry: Option<usize> = None;
        for i in 0..slots.len() {
            if !slots[i].alive || reachable[i] || !on_cycle(slots, i) {
                continue;
            }
            let smaller = match entry {
                None => true,
                Some(e) => slots[i].member.code < slots[e].member.code,
            };
            if smaller {
                entry = Some(i);
            }
        }
        let Some(entry) = entry else { break };

        if let Some(parent) = slots[entry].parent.take() {
            slots[parent].children.retain(|&c| c != entry);
        }
        slots[entry].member.is_orphaned = true;
        slots[entry].root = true;
        log::warn!(
            "sponsor cycle broken at member {:?}",
            slots[entry].member.code
        );
        broken.push(slots[entry].member.code.clone());
        mark_reachable(slots, &mut reachable, &[entry]);
    }
    broken
}

fn mark_reachable(slots: &[Slot], reachable: &mut [bool], starts: &[usize]) {
    let mut stack: Vec<usize> = starts.to_vec();
    while let Some(i) = stack.pop() {
        if reachable[i] {
            continue;
        }
        reachable[i] = true;
        stack.extend(&slots[i].children);
    }
}

/// A slot is on a cycle iff following parent links returns to it.
fn on_cycle(slots: &[Slot], start: usize) -> bool {
    let mut seen = HashSet::new();
    let mut current = slots[start].parent;
    while let Some(p) = current {
        if p == start {
            return true;
        }
        if !seen.insert(p) {
            return false;
        }
        current = slots[p].parent;
    }
    false
}

/// Move a slot subtree out of the arena into an owned tree.
fn assemble(slots: &mut [Slot], idx: usize) -> TreeNode {
    let children = std::mem::take(&mut slots[idx].children);
    let member = std::mem::take(&mut slots[idx].member);
    let mut node = TreeNode::new(member);
    node.children = children
        .into_iter()
        .map(|child| assemble(slots, child))
        .collect();
    node
}

fn index_walk(
    node: &TreeNode,
    path: &mut Vec<usize>,
    paths: &mut HashMap<String, NodePath>,
    member_count: &mut usize,
    orphan_count: &mut usize,
) {
    *member_count += 1;
    if node.user.is_orphaned {
        *orphan_count += 1;
    }
    if !node.key.is_empty() {
        paths.insert(node.key.clone(), path.clone());
    }
    for (i, child) in node.children.iter().enumerate() {
        path.push(i);
        index_walk(child, path, paths, member_count, orphan_count);
        path.pop();
    }
}
