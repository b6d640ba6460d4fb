use crate::member::PodMember;

macro_rules! impl_opaque_member {
    ($($ty:ty),* $(,)?) => {
        $(
            impl PodMember for $ty {
                type SaveAs<'a>
                    = &'a $ty
                where
                    Self: 'a;
                type LoadAs = $ty;

                #[inline(always)]
                fn save_as(&self) -> &$ty {
                    self
                }

                #[inline(always)]
                fn materialize(data: $ty) -> $ty {
                    data
                }
            }
        )*
    };
}

impl_opaque_member!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
);
