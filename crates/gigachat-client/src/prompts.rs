//! Worksheet prompts for the GigaChat models
//!
//! Both prompts pin the provider to the fixed directive vocabulary the LaTeX
//! templates define: `\TaskBox{n}{text}`, `\WriteField{<h>mm}`, `\newpage`
//! and a final answers table on its own page.

use worksheet_core::Difficulty;

/// Prompt for extracting tasks from photographed pages into body markup.
pub fn extraction(task_count: u32, grid_height_mm: u32) -> String {
    format!(
        r#"Ты - профессиональный верстальщик LaTeX и математик.
Твоя задача:
1. Распознать ВСЕ математические задачи с изображения.
2. Оформить их в LaTeX строго по шаблону.
3. Разбить задачи по страницам (не более {task_count} задач на одной странице).
4. В конце добавить страницу с КРАТКИМИ ответами (только числа, без решений).

ПАРАМЕТРЫ ЛИСТА:
- Максимум задач на странице: {task_count}
- Высота поля для решения: {grid_height_mm}mm

ШАБЛОН ОФОРМЛЕНИЯ ЗАДАЧИ:
Для каждой задачи используй ОБЯЗАТЕЛЬНО такую структуру (ДВА аргумента!):
\TaskBox{{Номер}}{{Текст задачи}}
Пример: \TaskBox{{1}}{{Решите уравнение $x^2=4$.}}
ВАЖНО: Не забывай номер задачи в первых скобках!

\WriteField{{{grid_height_mm}mm}}

ПРАВИЛА ВЕРСТКИ:
1. Иди по порядку: Задача 1, Задача 2, и т.д.
2. После каждой {task_count}-й задачи вставляй команду `\newpage` (разрыв страницы).
3. ОБЯЗАТЕЛЬНО вставляй `\WriteField{{{grid_height_mm}mm}}` после КАЖДОЙ задачи. Это клетчатое поле, без него нельзя!

ИНСТРУКЦИЯ ПО ОТВЕТАМ (КРИТИЧЕСКИ ВАЖНО):
После самой последней задачи вставь `\newpage` и напиши:
\section*{{Ответы}}
\begin{{tabular}}{{|c|c|}}
\hline
№ & Ответ \\
\hline
1 & $...$ \\
2 & $...$ \\
\hline
\end{{tabular}}

ФОРМАТ ОТВЕТОВ:
- ТОЛЬКО числовой ответ в формате LaTeX (например: $x=2$, $15$, $\frac{{1}}{{2}}$)
- БЕЗ пояснений, БЕЗ решений, БЕЗ комментариев

ИТОГОВЫЙ ВЫВОД:
Только валидный LaTeX код тела документа (Tasks + PageBreaks + Answers). Без преамбулы `\documentclass`."#
    )
}

/// Prompt for regenerating a worksheet as "variant 2" with new numbers.
pub fn regeneration(
    original: &str,
    task_count: u32,
    grid_height_mm: u32,
    difficulty: Difficulty,
) -> String {
    let level = match difficulty {
        Difficulty::Easier => {
            "- УРОВЕНЬ: Сделай задачи ЗАМЕТНО ПРОЩЕ (меньшие числа, меньше шагов, без сложных конструкций)."
        }
        Difficulty::Harder => {
            "- УРОВЕНЬ: Сделай задачи СЛОЖНЕЕ (увеличь числа, добавь вычисления, усложни структуру)."
        }
        Difficulty::Same => "- УРОВЕНЬ: СОХРАНИ текущую сложность.",
    };

    format!(
        r#"Ты - профессиональный методист и верстальщик LaTeX.
Твоя задача: создать ВАРИАНТ 2 контрольной работы с ДРУГИМИ ЧИСЛАМИ.

ИСХОДНЫЙ ВАРИАНТ (Вариант 1):
"""
{original}
"""

КРИТИЧЕСКИ ВАЖНЫЕ ПРАВИЛА ГЕНЕРАЦИИ:
{level}
1. Для КАЖДОЙ задачи создай АНАЛОГИЧНУЮ, но с ДРУГИМИ числами.
2. СОХРАНИ: тип задачи, базовую структуру.
3. ИЗМЕНИ: все числовые значения (коэффициенты, константы, параметры).
4. Используй "удобные" числа для ручных вычислений (целые, простые дроби).
5. Количество задач должно ТОЧНО совпадать с исходным вариантом.

ПАРАМЕТРЫ ЛИСТА:
- Максимум задач на странице: {task_count}
- Высота поля для решения: {grid_height_mm}mm

ШАБЛОН ОФОРМЛЕНИЯ (СТРОГО):
\TaskBox{{Номер}}{{Текст новой задачи}}
\WriteField{{{grid_height_mm}mm}}

ПРАВИЛА ВЕРСТКИ:
1. После КАЖДОЙ задачи обязательно вставляй `\WriteField{{{grid_height_mm}mm}}`.
2. После каждой {task_count}-й задачи вставляй `\newpage`.

ОТВЕТЫ (в конце документа):
\newpage
\section*{{Ответы (Вариант 2)}}
\begin{{tabular}}{{|c|c|}}
\hline
№ & Ответ \\
\hline
1 & $...$ \\
\hline
\end{{tabular}}

ФОРМАТ ОТВЕТОВ:
- ТОЛЬКО числовой ответ (например: $x=3$, $24$, $\frac{{2}}{{3}}$)
- БЕЗ решений, БЕЗ пояснений, БЕЗ комментариев

ИТОГОВЫЙ ВЫВОД:
Только LaTeX код (Задачи + WriteField + PageBreaks + Таблица ответов)."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_embeds_layout_parameters() {
        let prompt = extraction(3, 48);
        assert!(prompt.contains("\\WriteField{48mm}"));
        assert!(prompt.contains("Максимум задач на странице: 3"));
        assert!(prompt.contains("\\TaskBox{Номер}{Текст задачи}"));
        assert!(prompt.contains("\\section*{Ответы}"));
    }

    #[test]
    fn regeneration_embeds_original_and_difficulty() {
        let prompt = regeneration("\\TaskBox{1}{$x^2=4$}", 3, 48, Difficulty::Harder);
        assert!(prompt.contains("\\TaskBox{1}{$x^2=4$}"));
        assert!(prompt.contains("СЛОЖНЕЕ"));
        assert!(prompt.contains("\\WriteField{48mm}"));
        assert!(prompt.contains("Ответы (Вариант 2)"));
    }

    #[test]
    fn regeneration_preserves_complexity_by_default() {
        let prompt = regeneration("body", 4, 32, Difficulty::Same);
        assert!(prompt.contains("СОХРАНИ текущую сложность"));
    }
}
