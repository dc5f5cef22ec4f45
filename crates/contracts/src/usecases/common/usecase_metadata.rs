/// Описание сценария (UseCase), по которому UI подписывает диалоги
/// и помечает их корневые элементы.
pub trait UseCaseMetadata {
    /// Индекс сценария, например "u501"
    fn usecase_index() -> &'static str;

    /// Техническое имя, например "import_departments"
    fn usecase_name() -> &'static str;

    /// Заголовок для пользователя
    fn display_name() -> &'static str;

    fn description() -> &'static str {
        ""
    }

    /// "u501_import_departments"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}
