//! The drawable algebra.
//!
//! Everything that can appear in a plot implements [`Drawable`]. Drawables
//! are combined with `+` into a [`DrawableGroup`], which renders its members
//! in order, so later members are drawn on top of earlier ones.
//!
//! Operands are normalized into a [`Plottable`] (a single drawable or a
//! group) and merged by [`combine`]. Groups are always flattened:
//!
//! ```
//! # use funplot::{Curve, Function, Points};
//! let a = Function::parse("x").unwrap();
//! let b = Curve::new(vec![0.0, 1.0], vec![1.0, 0.0]);
//! let c = Points::new(vec![0.5], vec![0.5]);
//!
//! let group = (a.clone() + b.clone()) + (c + a);
//! assert_eq!(group.len(), 4);
//! ```
//!
//! Only drawables can be added:
//!
//! ```compile_fail
//! # use funplot::Function;
//! let group = Function::parse("x").unwrap() + 1.0;
//! ```

use std::{
    fmt, mem,
    ops::{Add, AddAssign},
};

use crate::{curve::Curve, figure::Figure, function::Function, points::Points};

/// Something that can render itself onto a [`Figure`].
pub trait Drawable: fmt::Debug {
    /// Records this drawable's series on `figure`.
    fn render(&self, figure: &mut Figure);

    /// Creates a boxed clone of this drawable.
    fn clone_box(&self) -> Box<dyn Drawable>;
}

/// Enable cloning of `Box<dyn Drawable>` by delegating to the clone_box method.
impl Clone for Box<dyn Drawable> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// An ordered collection of drawables; itself a drawable.
#[derive(Debug, Clone, Default)]
pub struct DrawableGroup {
    members: Vec<Box<dyn Drawable>>,
}

impl DrawableGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a group rendering `members` in the given order.
    pub fn from_members(members: Vec<Box<dyn Drawable>>) -> Self {
        Self { members }
    }

    /// Appends a drawable; it will be rendered last.
    pub fn push(&mut self, drawable: impl Drawable + 'static) {
        self.members.push(Box::new(drawable));
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterates over the members in render order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Drawable> {
        self.members.iter().map(|member| member.as_ref())
    }

    pub fn into_members(self) -> Vec<Box<dyn Drawable>> {
        self.members
    }
}

impl Drawable for DrawableGroup {
    fn render(&self, figure: &mut Figure) {
        for member in &self.members {
            member.render(figure);
        }
    }

    fn clone_box(&self) -> Box<dyn Drawable> {
        Box::new(self.clone())
    }
}

/// An operand of `+`: a single drawable or a group of them.
#[derive(Debug, Clone)]
pub enum Plottable {
    Single(Box<dyn Drawable>),
    Group(DrawableGroup),
}

impl From<Box<dyn Drawable>> for Plottable {
    fn from(drawable: Box<dyn Drawable>) -> Self {
        Self::Single(drawable)
    }
}

impl From<DrawableGroup> for Plottable {
    fn from(group: DrawableGroup) -> Self {
        Self::Group(group)
    }
}

/// Merges two operands into one flat group, `lhs` members first.
pub fn combine(lhs: Plottable, rhs: Plottable) -> DrawableGroup {
    match (lhs, rhs) {
        (Plottable::Single(a), Plottable::Single(b)) => DrawableGroup::from_members(vec![a, b]),
        (Plottable::Single(a), Plottable::Group(group)) => {
            let mut members = Vec::with_capacity(group.len() + 1);
            members.push(a);
            members.extend(group.into_members());
            DrawableGroup::from_members(members)
        }
        (Plottable::Group(mut group), Plottable::Single(b)) => {
            group.members.push(b);
            group
        }
        (Plottable::Group(mut lhs), Plottable::Group(rhs)) => {
            lhs.members.extend(rhs.into_members());
            lhs
        }
    }
}

impl<R: Into<Plottable>> Add<R> for DrawableGroup {
    type Output = DrawableGroup;

    fn add(self, rhs: R) -> Self::Output {
        combine(Plottable::Group(self), rhs.into())
    }
}

impl<R: Into<Plottable>> AddAssign<R> for DrawableGroup {
    fn add_assign(&mut self, rhs: R) {
        let lhs = mem::take(self);
        *self = combine(Plottable::Group(lhs), rhs.into());
    }
}

/// Implements `Into<Plottable>` and `+` for concrete drawable types.
macro_rules! impl_single_drawable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Plottable {
                fn from(drawable: $ty) -> Self {
                    Self::Single(Box::new(drawable))
                }
            }

            impl<R: Into<Plottable>> Add<R> for $ty {
                type Output = DrawableGroup;

                fn add(self, rhs: R) -> Self::Output {
                    combine(self.into(), rhs.into())
                }
            }
        )*
    };
}

impl_single_drawable!(Function, Curve, Points);

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    /// A drawable that only records its label, in render order.
    #[derive(Debug, Clone)]
    struct Tag(&'static str);

    impl Drawable for Tag {
        fn render(&self, figure: &mut Figure) {
            figure.plot(&[0.0], &[0.0], &Default::default(), Some(self.0));
        }

        fn clone_box(&self) -> Box<dyn Drawable> {
            Box::new(self.clone())
        }
    }

    fn single(tag: &'static str) -> Plottable {
        Plottable::Single(Box::new(Tag(tag)))
    }

    fn rendered(group: &DrawableGroup) -> Vec<String> {
        let mut figure = Figure::default();
        group.render(&mut figure);
        figure
            .series()
            .iter()
            .filter_map(|series| series.label().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_single_plus_single() {
        let group = combine(single("a"), single("b"));
        assert_eq!(rendered(&group), ["a", "b"]);
    }

    #[test]
    fn test_single_plus_group_prepends() {
        let group = combine(single("x"), single("y"));
        let group = combine(single("s"), Plottable::Group(group));
        assert_eq!(rendered(&group), ["s", "x", "y"]);
    }

    #[test]
    fn test_group_plus_single_appends() {
        let group = combine(single("x"), single("y"));
        let group = combine(Plottable::Group(group), single("z"));
        assert_eq!(rendered(&group), ["x", "y", "z"]);
    }

    #[test]
    fn test_group_plus_group_flattens() {
        let left = combine(single("a"), single("b"));
        let right = combine(single("c"), single("d"));
        let group = combine(Plottable::Group(left), Plottable::Group(right));
        assert_eq!(group.len(), 4);
        assert_eq!(rendered(&group), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_add_assign() {
        let mut group = DrawableGroup::new();
        group += single("a");
        group += combine(single("b"), single("c"));
        group.push(Tag("d"));
        assert_eq!(rendered(&group), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_clone_is_deep() {
        let group = combine(single("a"), single("b"));
        let mut copy = group.clone();
        copy += single("c");
        assert_eq!(group.len(), 2);
        assert_eq!(copy.len(), 3);
    }

    proptest! {
        #[test]
        fn prop_left_fold_preserves_order(count in 1usize..12) {
            const TAGS: [&str; 12] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11"];
            let group = TAGS[..count]
                .iter()
                .fold(DrawableGroup::new(), |group, tag| group + single(tag));
            prop_assert_eq!(rendered(&group), TAGS[..count].to_vec());
        }
    }
}
