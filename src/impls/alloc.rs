use crate::member::PodMember;

impl PodMember for String {
    type SaveAs<'a>
        = &'a str
    where
        Self: 'a;
    type LoadAs = String;

    #[inline(always)]
    fn save_as(&self) -> &str {
        self
    }

    #[inline(always)]
    fn materialize(data: String) -> String {
        data
    }
}
